//! Main logger implementation
//!
//! Every accepted record goes to the console synchronously on the calling
//! thread and, while the file sink is running, into the bounded queue of an
//! [`AsyncWriter`]. A full queue drops the record and reports the drop on
//! stderr; callers are never blocked or failed.

use super::{
    appender::Appender,
    async_writer::{AsyncWriter, WorkerState},
    config::LoggerConfig,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    thread_identity::current_thread_identity,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

pub struct Logger {
    config: LoggerConfig,
    /// Read and written with relaxed ordering and no lock: an emitter racing
    /// with `set_min_level` may filter one record against the old level.
    min_level: AtomicU8,
    formatter: Formatter,
    console: Option<ConsoleAppender>,
    writer: Option<AsyncWriter>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Console-only logger with the default configuration.
    ///
    /// The file sink stays off until [`init`](Self::init) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        let console = ConsoleAppender::with_colors(config.use_colors);
        Self::with_parts(config, Some(console))
    }

    fn with_parts(config: LoggerConfig, console: Option<ConsoleAppender>) -> Self {
        Self {
            min_level: AtomicU8::new(config.min_level as u8),
            formatter: Formatter::new(config.max_record_len),
            console,
            writer: None,
            metrics: Arc::new(LoggerMetrics::new()),
            config,
        }
    }

    /// Start the file sink on `path` and set the minimum level.
    ///
    /// The file is created if absent and appended to otherwise. A running
    /// file sink is shut down first. On failure a diagnostic goes to stderr,
    /// the logger keeps working console-only, and the error is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_queue_logger::prelude::*;
    ///
    /// let mut logger = Logger::new();
    /// if let Err(e) = logger.init("app.log", LogLevel::Info) {
    ///     eprintln!("file logging disabled: {}", e);
    /// }
    /// logger.info("service started");
    /// logger.shutdown();
    /// ```
    pub fn init(&mut self, path: impl Into<PathBuf>, min_level: LogLevel) -> Result<()> {
        self.stop_file_sink();
        self.apply_min_level(min_level);
        self.config.file_path = path.into();

        let appender = match FileAppender::new(&self.config.file_path) {
            Ok(appender) => appender,
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to open log file '{}': {}. Falling back to console only.",
                    self.config.file_path.display(),
                    e
                );
                return Err(e);
            }
        };
        self.start_writer(Box::new(appender))
    }

    /// Start the file sink on the configured path at the current level.
    pub fn start(&mut self) -> Result<()> {
        let path = self.config.file_path.clone();
        let level = self.min_level();
        self.init(path, level)
    }

    /// Like [`init`](Self::init), with a caller-supplied sink in place of the
    /// log file.
    pub fn init_with_appender(
        &mut self,
        appender: Box<dyn Appender>,
        min_level: LogLevel,
    ) -> Result<()> {
        self.stop_file_sink();
        self.apply_min_level(min_level);
        self.start_writer(appender)
    }

    fn start_writer(&mut self, appender: Box<dyn Appender>) -> Result<()> {
        let sink = appender.name().to_string();
        match AsyncWriter::spawn(
            appender,
            self.config.queue_capacity,
            self.formatter.max_record_len(),
            Arc::clone(&self.metrics),
        ) {
            Ok(writer) => {
                self.writer = Some(writer);
                Ok(())
            }
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to start writer for '{}' sink: {}. Falling back to console only.",
                    sink, e
                );
                Err(e)
            }
        }
    }

    /// Keep the configuration in step with the live level
    fn apply_min_level(&mut self, level: LogLevel) {
        self.config.min_level = level;
        self.set_min_level(level);
    }

    fn stop_file_sink(&mut self) {
        if let Some(writer) = self.writer.take() {
            writer.shutdown();
        }
    }

    /// Change the minimum level. Not synchronized with concurrent emitters.
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            return;
        }
        let record = self
            .formatter
            .format(level, &current_thread_identity(), message.as_ref());
        self.emit(level, record);
    }

    /// Log pre-built format arguments; used by the logging macros.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let record = self
            .formatter
            .format_args(level, &current_thread_identity(), args);
        self.emit(level, record);
    }

    fn emit(&self, level: LogLevel, record: LogRecord) {
        if let Some(ref console) = self.console {
            // A closed stdout must not take the caller down with it
            let _ = console.write_line(level, &record);
        }

        if let Some(ref writer) = self.writer {
            match writer.push(record) {
                Ok(()) => {
                    self.metrics.record_logged();
                }
                Err(LoggerError::QueueFull { current, max }) => self.alert_and_drop(current, max),
                // File sink already shut down; console output is all that is left
                Err(_) => {}
            }
        }
    }

    /// Count a dropped record and report it on stderr.
    fn alert_and_drop(&self, current: usize, max: usize) {
        self.metrics.record_queue_full();
        let dropped = self.metrics.record_dropped() + 1;
        eprintln!(
            "[LOGGER WARNING] Log queue full ({}/{}), record dropped ({} dropped so far).",
            current, max, dropped
        );
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Whether records are currently handed to the file sink
    pub fn is_file_sink_enabled(&self) -> bool {
        self.writer.as_ref().is_some_and(AsyncWriter::is_accepting)
    }

    pub fn worker_state(&self) -> WorkerState {
        self.writer
            .as_ref()
            .map_or(WorkerState::NotStarted, AsyncWriter::worker_state)
    }

    /// Records waiting for the background writer
    pub fn queue_len(&self) -> usize {
        self.writer.as_ref().map_or(0, AsyncWriter::len)
    }

    /// Configuration as of the last `init`; reflects `set_min_level` calls
    /// only once the file sink is (re)started.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Get the number of records dropped because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_queue_logger::Logger;
    ///
    /// let logger = Logger::new();
    ///
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Written: {}", metrics.records_written());
    /// println!("Drop rate: {:.2}%", metrics.drop_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Drain the file queue, flush and close the file, and stop the worker.
    ///
    /// Idempotent; a no-op if the file sink never started. The join has no
    /// timeout. Records logged afterwards go to the console only.
    pub fn shutdown(&self) {
        if let Some(ref writer) = self.writer {
            writer.shutdown();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_queue_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .queue_capacity(256)
///     .max_record_len(512)
///     .console(ConsoleAppender::with_writer(std::io::sink()))
///     .build();
///
/// assert_eq!(logger.min_level(), LogLevel::Info);
/// assert!(!logger.is_file_sink_enabled());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Option<ConsoleAppender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console: None,
        }
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Target file used by [`Logger::start`]
    #[must_use = "builder methods return a new value"]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_record_len(mut self, len: usize) -> Self {
        self.config.max_record_len = len;
        self
    }

    /// Color stdout output by level
    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// Replace the stdout console sink
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleAppender) -> Self {
        self.console = Some(Some(console));
        self
    }

    /// Turn console output off entirely
    #[must_use = "builder methods return a new value"]
    pub fn without_console(mut self) -> Self {
        self.console = Some(None);
        self
    }

    /// Build the Logger with its file sink stopped
    pub fn build(self) -> Logger {
        let console = match self.console {
            Some(console) => console,
            None => Some(ConsoleAppender::with_colors(self.config.use_colors)),
        };
        Logger::with_parts(self.config, console)
    }

    /// Validate the configuration, then build
    pub fn try_build(self) -> Result<Logger> {
        self.config.validate()?;
        Ok(self.build())
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).expect("utf8")
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logger(level: LogLevel) -> (Logger, SharedBuf) {
        let buf = SharedBuf::default();
        let logger = Logger::builder()
            .min_level(level)
            .console(ConsoleAppender::with_writer(buf.clone()))
            .build();
        (logger, buf)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().without_console().build();
        assert_eq!(logger.min_level(), LogLevel::Debug);
        assert_eq!(logger.config().queue_capacity, 1024);
        assert_eq!(logger.worker_state(), WorkerState::NotStarted);
        assert!(!logger.is_file_sink_enabled());
    }

    #[test]
    fn test_try_build_rejects_invalid_config() {
        let result = Logger::builder().queue_capacity(0).try_build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_below_threshold_is_silent() {
        let (logger, console) = captured_logger(LogLevel::Warn);
        logger.debug("hidden");
        logger.info("hidden");
        assert!(console.contents().is_empty());

        logger.warn("shown");
        assert!(console.contents().ends_with("shown\n"));
    }

    #[test]
    fn test_set_min_level() {
        let (logger, console) = captured_logger(LogLevel::Error);
        logger.info("before");
        logger.set_min_level(LogLevel::Info);
        logger.info("after");

        assert_eq!(logger.min_level(), LogLevel::Info);
        let out = console.contents();
        assert!(!out.contains("before"));
        assert!(out.contains("after"));
    }

    #[test]
    fn test_console_line_layout() {
        let (logger, console) = captured_logger(LogLevel::Debug);
        logger.log_fmt(LogLevel::Info, format_args!("hello {}", 5));

        let out = console.contents();
        assert!(out.contains(" INFO ["));
        assert!(out.ends_with("] hello 5\n"));
        assert_eq!(out.matches('\n').count(), 1);
    }

    #[test]
    fn test_file_sink_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("test.log");
        let (mut logger, _console) = captured_logger(LogLevel::Debug);

        logger.init(&path, LogLevel::Info).expect("init");
        assert!(logger.is_file_sink_enabled());
        assert_eq!(logger.worker_state(), WorkerState::Running);

        logger.debug("x");
        logger.log_fmt(LogLevel::Info, format_args!("hello {}", 5));
        logger.shutdown();

        let content = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("hello 5"));
        assert_eq!(logger.worker_state(), WorkerState::Stopped);
        assert!(!logger.is_file_sink_enabled());
    }

    #[test]
    fn test_init_failure_falls_back_to_console() {
        let dir = TempDir::new().expect("temp dir");
        let (mut logger, console) = captured_logger(LogLevel::Debug);

        // A directory cannot be opened as the log file
        let result = logger.init(dir.path(), LogLevel::Info);
        assert!(result.is_err());
        assert!(!logger.is_file_sink_enabled());

        logger.info("still logging");
        assert!(console.contents().ends_with("still logging\n"));
    }

    #[test]
    fn test_shutdown_without_init_is_noop() {
        let (logger, _console) = captured_logger(LogLevel::Debug);
        logger.shutdown();
        logger.shutdown();
        assert_eq!(logger.worker_state(), WorkerState::NotStarted);
    }

    #[test]
    fn test_init_level_survives_restart() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("restart.log");
        let (mut logger, _console) = captured_logger(LogLevel::Debug);

        logger.init(&path, LogLevel::Warn).expect("init");
        assert_eq!(logger.min_level(), LogLevel::Warn);
        assert_eq!(logger.config().min_level, LogLevel::Warn);

        logger.shutdown();
        logger.start().expect("restart");
        assert_eq!(logger.min_level(), LogLevel::Warn);
        assert_eq!(logger.config().min_level, LogLevel::Warn);

        logger.set_min_level(LogLevel::Error);
        logger.shutdown();
        logger.start().expect("restart after set_min_level");
        assert_eq!(logger.min_level(), LogLevel::Error);
        assert_eq!(logger.config().min_level, LogLevel::Error);

        logger.info("filtered");
        logger.error("kept");
        logger.shutdown();

        let content = std::fs::read_to_string(&path).expect("read log");
        assert!(!content.contains("filtered"));
        assert!(content.contains("kept"));
    }

    #[test]
    fn test_init_with_appender_updates_config_level() {
        let (mut logger, _console) = captured_logger(LogLevel::Debug);
        logger
            .init_with_appender(
                Box::new(ConsoleAppender::with_writer(std::io::sink())),
                LogLevel::Info,
            )
            .expect("init");
        assert_eq!(logger.config().min_level, LogLevel::Info);
        logger.shutdown();
    }

    #[test]
    fn test_reinit_switches_files() {
        let dir = TempDir::new().expect("temp dir");
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        let (mut logger, _console) = captured_logger(LogLevel::Debug);

        logger.init(&first, LogLevel::Debug).expect("init first");
        logger.info("to first");
        logger.init(&second, LogLevel::Debug).expect("init second");
        logger.info("to second");
        logger.shutdown();

        let first = std::fs::read_to_string(first).expect("read first");
        let second = std::fs::read_to_string(second).expect("read second");
        assert!(first.contains("to first") && !first.contains("to second"));
        assert!(second.contains("to second") && !second.contains("to first"));
    }
}
