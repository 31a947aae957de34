//! Timestamp source for log records
//!
//! Produces local wall-clock timestamps with millisecond precision in the
//! fixed shape `YYYY-MM-DD HH:MM:SS.mmm`. Every call returns an owned string,
//! so concurrent callers never share a formatting buffer.

use chrono::{DateTime, Local};
use std::fmt::Write;

/// strftime pattern for record timestamps, e.g. `2025-01-08 10:30:45.123`
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Length in bytes of a well-formed timestamp
pub const TIMESTAMP_LEN: usize = 23;

/// Current local time as `YYYY-MM-DD HH:MM:SS.mmm`.
///
/// Returns an empty string if the clock value cannot be rendered in that
/// shape. Logging never fails because of the clock.
///
/// # Examples
///
/// ```
/// use rust_queue_logger::core::timestamp::{now_formatted, TIMESTAMP_LEN};
///
/// let ts = now_formatted();
/// assert!(ts.is_empty() || ts.len() == TIMESTAMP_LEN);
/// ```
#[must_use]
pub fn now_formatted() -> String {
    format_timestamp(&Local::now())
}

/// Render `datetime` as `YYYY-MM-DD HH:MM:SS.mmm`, or `""` on failure.
#[must_use]
pub fn format_timestamp(datetime: &DateTime<Local>) -> String {
    let mut buf = String::with_capacity(TIMESTAMP_LEN);
    if write!(buf, "{}", datetime.format(TIMESTAMP_PATTERN)).is_err() {
        return String::new();
    }
    // Years outside 0000..=9999 would change the shape
    if buf.len() != TIMESTAMP_LEN {
        return String::new();
    }
    buf
}
