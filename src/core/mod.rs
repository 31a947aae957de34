//! Core logger types and traits

pub mod appender;
pub mod async_writer;
pub mod bounded_queue;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod thread_identity;
pub mod timestamp;

pub use appender::Appender;
pub use async_writer::{AsyncWriter, WorkerState};
pub use bounded_queue::{BoundedQueue, DEFAULT_QUEUE_CAPACITY};
pub use config::{LoggerConfig, DEFAULT_LOG_FILE};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, DEFAULT_MAX_RECORD_LEN};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use thread_identity::current_thread_identity;
pub use timestamp::now_formatted;
