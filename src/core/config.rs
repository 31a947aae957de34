//! Logger configuration
//!
//! All settings are fixed when the logger is built, except the minimum level
//! which can be changed afterwards through [`Logger::set_min_level`].
//!
//! [`Logger::set_min_level`]: super::logger::Logger::set_min_level

use super::bounded_queue::DEFAULT_QUEUE_CAPACITY;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_record::{DEFAULT_MAX_RECORD_LEN, MIN_RECORD_LEN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default target file of the file sink
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// # Examples
///
/// ```
/// use rust_queue_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "min_level": "Warn", "queue_capacity": 64 }"#)
///     .expect("valid config");
///
/// assert_eq!(config.min_level, LogLevel::Warn);
/// assert_eq!(config.queue_capacity, 64);
/// assert_eq!(config.file_path.to_str(), Some("app.log"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// File the file sink appends to
    pub file_path: PathBuf,
    /// Records below this level are discarded
    pub min_level: LogLevel,
    /// Records the file queue can hold before new ones are dropped
    pub queue_capacity: usize,
    /// Upper bound of a record in bytes, trailing newline included
    pub max_record_len: usize,
    /// Color the console output by level
    pub use_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            min_level: LogLevel::Debug,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
            use_colors: false,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue_capacity must be at least 1",
            ));
        }
        if self.max_record_len < MIN_RECORD_LEN {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("max_record_len must be at least {} bytes", MIN_RECORD_LEN),
            ));
        }
        if self.file_path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "file_path is empty"));
        }
        Ok(())
    }
}
