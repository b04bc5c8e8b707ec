//! Error types for taskdash
//!
//! Errors are grouped by where they are recovered:
//! - Validation: surfaced as field-level messages on the form, never fatal
//! - Auth: surfaced as a single banner message on the login/signup form
//! - TaskNotFound: an update aimed at a task that no longer exists
//! - Io/Json/TomlParse: storage and configuration failures, propagated to
//!   the embedding caller

use thiserror::Error;

use crate::task::TaskId;

/// Main error type for taskdash operations
#[derive(Error, Debug)]
pub enum Error {
    // Recoverable at the form boundary
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// True when the error belongs next to a form field rather than in a
    /// banner or a log line.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// Result type alias for taskdash operations
pub type Result<T> = std::result::Result<T, Error>;
