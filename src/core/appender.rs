//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// A destination for formatted records.
///
/// The background writer owns its appender exclusively, so implementations
/// only need to be `Send`.
pub trait Appender: Send {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
