//! Background writer for the file sink
//!
//! Producers push formatted records into a [`BoundedQueue`] guarded by one
//! mutex and wake the single worker thread through a condition variable.
//! The worker drains the queue, writing each record with the lock released,
//! then flushes its appender once the queue is observed empty.
//!
//! Shutdown sets the stop flag under the same mutex, wakes the worker and
//! joins it. The worker exits only after a final drain and flush, and drops
//! (closes) its appender on the way out. The join has no timeout.

use super::appender::Appender;
use super::bounded_queue::BoundedQueue;
use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Name given to the background writer thread
pub const WRITER_THREAD_NAME: &str = "logger-writer";

/// Lifecycle of the background writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    NotStarted,
    Running,
    StopRequested,
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::NotStarted => write!(f, "NotStarted"),
            WorkerState::Running => write!(f, "Running"),
            WorkerState::StopRequested => write!(f, "StopRequested"),
            WorkerState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Everything guarded by the queue mutex
struct QueueState {
    queue: BoundedQueue,
    accepting: bool,
    stop_requested: bool,
    worker_state: WorkerState,
}

struct Shared {
    state: Mutex<QueueState>,
    available: Condvar,
}

pub struct AsyncWriter {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
}

impl AsyncWriter {
    /// Start a worker thread that owns `appender`.
    ///
    /// Fails only if the thread cannot be spawned; the appender is dropped
    /// in that case.
    pub fn spawn(
        appender: Box<dyn Appender>,
        capacity: usize,
        max_record_len: usize,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                queue: BoundedQueue::new(capacity, max_record_len),
                accepting: true,
                stop_requested: false,
                worker_state: WorkerState::NotStarted,
            }),
            available: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker_metrics = Arc::clone(&metrics);
        let handle = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_worker(&worker_shared, appender, &worker_metrics))
            .map_err(LoggerError::WorkerSpawn)?;

        shared.state.lock().worker_state = WorkerState::Running;

        Ok(Self {
            shared,
            handle: Mutex::new(Some(handle)),
            metrics,
        })
    }

    /// Hand a record to the worker without blocking on it.
    ///
    /// Returns `QueueFull` if the queue is at capacity and `LoggerStopped`
    /// once shutdown has begun. The record is dropped in both cases.
    pub fn push(&self, record: LogRecord) -> Result<()> {
        let mut state = self.shared.state.lock();
        if !state.accepting {
            return Err(LoggerError::LoggerStopped);
        }
        match state.queue.push_record(record) {
            Ok(()) => {
                drop(state);
                self.shared.available.notify_one();
                Ok(())
            }
            Err(_rejected) => Err(LoggerError::queue_full(
                state.queue.len(),
                state.queue.capacity(),
            )),
        }
    }

    /// Stop the worker after it has written everything queued so far.
    ///
    /// Idempotent. Concurrent callers all return only after the worker has
    /// exited and the appender has been closed.
    pub fn shutdown(&self) {
        let mut handle_slot = self.handle.lock();
        let Some(handle) = handle_slot.take() else {
            return;
        };

        {
            let mut state = self.shared.state.lock();
            state.accepting = false;
            state.stop_requested = true;
            state.worker_state = WorkerState::StopRequested;
        }
        self.shared.available.notify_all();

        if let Err(e) = handle.join() {
            eprintln!(
                "[LOGGER ERROR] Background writer panicked during shutdown: {:?}",
                e
            );
        }

        // Only non-empty if the worker died before its final drain
        let mut state = self.shared.state.lock();
        while state.queue.pop().is_some() {
            self.metrics.record_dropped();
        }
        state.worker_state = WorkerState::Stopped;
    }

    /// Whether pushes are currently accepted
    pub fn is_accepting(&self) -> bool {
        self.shared.state.lock().accepting
    }

    pub fn worker_state(&self) -> WorkerState {
        self.shared.state.lock().worker_state
    }

    /// Records currently waiting in the queue
    pub fn len(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.state.lock().queue.capacity()
    }
}

impl Drop for AsyncWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(shared: &Shared, mut appender: Box<dyn Appender>, metrics: &LoggerMetrics) {
    let mut state = shared.state.lock();
    loop {
        // Idle
        while state.queue.is_empty() && !state.stop_requested {
            shared.available.wait(&mut state);
        }

        // Draining: the lock is released around every write
        let mut wrote = false;
        while let Some(record) = state.queue.pop() {
            MutexGuard::unlocked(&mut state, || {
                write_record(appender.as_mut(), &record, metrics);
            });
            wrote = true;
        }

        // Flushing
        if wrote {
            MutexGuard::unlocked(&mut state, || flush_appender(appender.as_mut(), metrics));
        }

        // No pushes are accepted once stop is requested, so empty stays empty
        if state.stop_requested && state.queue.is_empty() {
            break;
        }
    }
    drop(state);

    flush_appender(appender.as_mut(), metrics);
    drop(appender);
}

/// Write one record; failures and panics discard the record only.
fn write_record(appender: &mut dyn Appender, record: &LogRecord, metrics: &LoggerMetrics) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.append(record)));
    match result {
        Ok(Ok(())) => {
            metrics.record_written();
        }
        Ok(Err(e)) => {
            metrics.record_write_failure();
            eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
        }
        Err(panic_info) => {
            metrics.record_write_failure();
            eprintln!(
                "[LOGGER CRITICAL] Appender '{}' panicked: {}. Record discarded.",
                appender.name(),
                panic_message(&*panic_info)
            );
        }
    }
}

fn flush_appender(appender: &mut dyn Appender, metrics: &LoggerMetrics) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush()));
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            metrics.record_flush_failure();
            eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.name(), e);
        }
        Err(panic_info) => {
            metrics.record_flush_failure();
            eprintln!(
                "[LOGGER CRITICAL] Appender '{}' panicked during flush: {}",
                appender.name(),
                panic_message(&*panic_info)
            );
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
