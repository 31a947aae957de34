//! Fixed-capacity ring buffer of log records
//!
//! The queue never grows and never blocks: a push into a full queue is
//! rejected and the queue is left untouched. It is not synchronized itself;
//! [`AsyncWriter`](super::async_writer::AsyncWriter) keeps it behind its mutex.

use super::log_record::{LogRecord, DEFAULT_MAX_RECORD_LEN};

/// Default number of records the queue can hold
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug)]
pub struct BoundedQueue {
    slots: Box<[Option<LogRecord>]>,
    head: usize,
    tail: usize,
    count: usize,
    max_record_len: usize,
}

impl BoundedQueue {
    /// Create a queue holding up to `capacity` records of at most
    /// `max_record_len` bytes each. A zero capacity is raised to one.
    pub fn new(capacity: usize, max_record_len: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
            max_record_len,
        }
    }

    /// Copy `line` into the queue, truncating it to the record bound.
    ///
    /// Returns `false` without touching the queue if it is full or `line`
    /// is empty.
    pub fn push(&mut self, line: &str) -> bool {
        if line.is_empty() || self.is_full() {
            return false;
        }
        self.insert(LogRecord::from_line(line, self.max_record_len));
        true
    }

    /// Move an already formatted record into the queue.
    ///
    /// The record is handed back if the queue is full or the record is empty.
    pub fn push_record(&mut self, record: LogRecord) -> Result<(), LogRecord> {
        if record.is_empty() || self.is_full() {
            return Err(record);
        }
        self.insert(record);
        Ok(())
    }

    fn insert(&mut self, record: LogRecord) {
        self.slots[self.tail] = Some(record);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
    }

    /// Remove and return the oldest record.
    pub fn pop(&mut self) -> Option<LogRecord> {
        if self.count == 0 {
            return None;
        }
        let record = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        record
    }

    /// Drop every queued record.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn max_record_len(&self) -> usize {
        self.max_record_len
    }
}

impl Default for BoundedQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY, DEFAULT_MAX_RECORD_LEN)
    }
}
