//! # Rust Queue Logger
//!
//! A leveled logger with two sinks: the console, written synchronously on the
//! calling thread, and a log file, written by a single background thread fed
//! through a fixed-capacity queue.
//!
//! ## Features
//!
//! - **Never blocks callers**: a full queue drops the record and says so on stderr
//! - **Bounded memory**: fixed queue capacity and a fixed maximum record length
//! - **Clean shutdown**: the worker drains, flushes and closes the file before exiting
//! - **Thread safe**: share one `Logger` across threads behind an `Arc`
//!
//! ## Example
//!
//! ```no_run
//! use rust_queue_logger::prelude::*;
//! use rust_queue_logger::info;
//!
//! let mut logger = Logger::new();
//! logger.init("app.log", LogLevel::Info)?;
//!
//! info!(logger, "hello {}", 5);
//!
//! logger.shutdown();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, WorkerState,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    Appender, AsyncWriter, BoundedQueue, Formatter, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Result, WorkerState,
};
