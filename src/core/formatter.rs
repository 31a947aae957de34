//! Line formatter
//!
//! Builds records of the shape
//!
//! ```text
//! <timestamp> <LEVEL> [<thread-identity>] <message>\n
//! ```
//!
//! The whole line, newline included, is capped at the configured record
//! length. Embedded newlines, carriage returns and tabs in the message are
//! escaped (`\n` becomes the two characters `\` `n`) so a record always
//! occupies exactly one line of the log file.

use super::log_level::LogLevel;
use super::log_record::{floor_char_boundary, LogRecord, DEFAULT_MAX_RECORD_LEN, MIN_RECORD_LEN};
use super::timestamp::now_formatted;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    max_record_len: usize,
}

impl Formatter {
    pub fn new(max_record_len: usize) -> Self {
        Self {
            max_record_len: max_record_len.max(MIN_RECORD_LEN),
        }
    }

    pub fn max_record_len(&self) -> usize {
        self.max_record_len
    }

    /// Format a plain message.
    pub fn format(&self, level: LogLevel, thread_identity: &str, message: &str) -> LogRecord {
        self.build(level, thread_identity, |out| out.write_str(message))
    }

    /// Format a message from `format_args!` output.
    ///
    /// Substitution is best effort: if an argument's `Display` impl fails,
    /// the text produced up to that point is kept and nothing panics.
    pub fn format_args(
        &self,
        level: LogLevel,
        thread_identity: &str,
        args: fmt::Arguments<'_>,
    ) -> LogRecord {
        self.build(level, thread_identity, |out| fmt::write(out, args))
    }

    fn build<F>(&self, level: LogLevel, thread_identity: &str, message: F) -> LogRecord
    where
        F: FnOnce(&mut EscapingWriter<'_>) -> fmt::Result,
    {
        // One byte is reserved for the newline
        let mut line = BoundedLine::new(self.max_record_len - 1);

        let timestamp = now_formatted();
        // A full buffer makes every later write fail, so the results are ignored
        let _ = if timestamp.is_empty() {
            write!(line, "{} [{}] ", level.to_str(), thread_identity)
        } else {
            write!(line, "{} {} [{}] ", timestamp, level.to_str(), thread_identity)
        };
        let _ = message(&mut EscapingWriter { inner: &mut line });

        let mut buf = line.into_inner();
        buf.push('\n');
        LogRecord::from_bounded(buf)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORD_LEN)
    }
}

/// `fmt::Write` sink that stops accepting text at a byte limit.
struct BoundedLine {
    buf: String,
    limit: usize,
}

impl BoundedLine {
    fn new(limit: usize) -> Self {
        Self {
            buf: String::with_capacity(limit.min(DEFAULT_MAX_RECORD_LEN) + 1),
            limit,
        }
    }

    fn into_inner(self) -> String {
        self.buf
    }
}

impl fmt::Write for BoundedLine {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }
        self.buf.push_str(&s[..floor_char_boundary(s, room)]);
        // Signal "full" so `fmt::write` stops substituting the remaining args
        Err(fmt::Error)
    }
}

/// Escapes line breaks and tabs on the way into a `BoundedLine`.
struct EscapingWriter<'a> {
    inner: &'a mut BoundedLine,
}

impl fmt::Write for EscapingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut start = 0;
        for (idx, ch) in s.char_indices() {
            let escaped = match ch {
                '\n' => "\\n",
                '\r' => "\\r",
                '\t' => "\\t",
                _ => continue,
            };
            self.inner.write_str(&s[start..idx])?;
            self.inner.write_str(escaped)?;
            start = idx + ch.len_utf8();
        }
        self.inner.write_str(&s[start..])
    }
}
