//! Console appender implementation
//!
//! Writes records synchronously on the calling thread. Standard output is
//! serialized only by its own internal lock; custom targets sit behind a
//! mutex of their own.

use crate::core::{Appender, LogLevel, LogRecord, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

enum ConsoleTarget {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    use_colors: bool,
}

impl ConsoleAppender {
    /// Plain (uncolored) output to stdout
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            use_colors: false,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            use_colors,
        }
    }

    /// Send console output to `writer` instead of stdout.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_queue_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(std::io::sink());
    /// ```
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            target: ConsoleTarget::Writer(Mutex::new(Box::new(writer))),
            use_colors: false,
        }
    }

    #[must_use]
    pub fn colored(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Write one record, colored by `level` if colors are enabled.
    pub fn write_line(&self, level: LogLevel, record: &LogRecord) -> Result<()> {
        if self.use_colors {
            let colored = self.colorize(level, record);
            self.write_bytes(colored.as_bytes())
        } else {
            self.write_bytes(record.as_bytes())
        }
    }

    #[cfg(feature = "console")]
    fn colorize(&self, level: LogLevel, record: &LogRecord) -> String {
        let line = record.as_str().trim_end_matches('\n');
        format!("{}\n", line.color(level.color_code()))
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, _level: LogLevel, record: &LogRecord) -> String {
        record.as_str().to_string()
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
            }
            ConsoleTarget::Writer(writer) => {
                writer.lock().write_all(bytes)?;
            }
        }
        Ok(())
    }

    fn flush_target(&self) -> Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.write_bytes(record.as_bytes())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_target()
    }

    fn name(&self) -> &str {
        "console"
    }
}
