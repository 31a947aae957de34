//! Formatted log record

use std::fmt;

/// Default upper bound of a record in bytes, trailing newline included
pub const DEFAULT_MAX_RECORD_LEN: usize = 1024;

/// Smallest usable bound: one byte of content plus the newline
pub const MIN_RECORD_LEN: usize = 2;

/// One fully formatted, immutable log line.
///
/// A record never exceeds the byte bound it was built with. Truncation always
/// lands on a UTF-8 character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    line: String,
}

impl LogRecord {
    /// Copy `line` into a new record of at most `max_len` bytes.
    ///
    /// A trailing newline survives truncation.
    pub fn from_line(line: &str, max_len: usize) -> Self {
        let max_len = max_len.max(MIN_RECORD_LEN);
        if line.len() <= max_len {
            return Self {
                line: line.to_string(),
            };
        }

        let has_newline = line.ends_with('\n');
        let budget = if has_newline { max_len - 1 } else { max_len };
        let mut owned = String::with_capacity(max_len);
        owned.push_str(&line[..floor_char_boundary(line, budget)]);
        if has_newline {
            owned.push('\n');
        }
        Self { line: owned }
    }

    /// Wrap a line the caller has already bounded.
    pub(crate) fn from_bounded(line: String) -> Self {
        Self { line }
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn into_string(self) -> String {
        self.line
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl AsRef<str> for LogRecord {
    fn as_ref(&self) -> &str {
        &self.line
    }
}

/// Largest index `<= max` that is a char boundary of `s`.
pub(crate) fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
