//! Configuration loading and management
//!
//! Handles parsing of `taskdash.toml` configuration files. Every field has
//! a default so an empty or missing file yields a working configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::EventDestination;

/// Default configuration file name
pub const CONFIG_FILE: &str = "taskdash.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Event destination: `-` for stdout, otherwise a file path
    #[serde(default)]
    pub events: Option<String>,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Task collection configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events: None,
            session: SessionConfig::default(),
            tasks: TasksConfig::default(),
        }
    }
}

/// Session-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File backing the durable session store
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,
}

fn default_store_file() -> PathBuf {
    PathBuf::from("taskdash-session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
        }
    }
}

/// Task-collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Simulated remote round-trip for create/update, in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    800
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a `taskdash.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn task_latency(&self) -> Duration {
        Duration::from_millis(self.tasks.latency_ms)
    }

    pub fn event_destination(&self) -> Option<EventDestination> {
        EventDestination::parse(self.events.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.session.store_file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "session.store_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
