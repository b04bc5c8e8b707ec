//! taskdash - Task Dashboard State Library
//!
//! This library is the state layer behind a personal task dashboard:
//! session lifecycle, the task collection, filtering, and the create-or-edit
//! modal. A presentation layer renders whatever these stores currently hold
//! and forwards user intents back into them.
//!
//! # Core Concepts
//!
//! - **Session**: login/signup/logout with restore from durable storage
//! - **Tasks**: ordered collection with assigned ids and simulated latency
//! - **Filtering**: free-text search composed with a status predicate
//! - **Form**: the create-or-edit modal state machine
//! - **Events**: JSON-line output for external integrations
//!
//! # Module Organization
//!
//! - `auth`: authentication backend boundary and the simulated backend
//! - `config`: configuration loading from `taskdash.toml`
//! - `dashboard`: top-level dashboard state and user intents
//! - `error`: error types and result aliases
//! - `events`: structured event output
//! - `filter`: search and status filtering
//! - `form`: modal form state
//! - `session`: session lifecycle manager
//! - `storage`: durable key-value storage
//! - `task`: task collection and task types

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod filter;
pub mod form;
pub mod session;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
