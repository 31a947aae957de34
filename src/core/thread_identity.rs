//! Identity of the calling thread for log records

use std::cell::RefCell;

/// Returned when neither a name nor a numeric id is available
pub const UNKNOWN_THREAD: &str = "tid:?";

// Thread-local cache; a thread's name and id never change after spawn
thread_local! {
    static IDENTITY_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Name of the current thread, or `tid:<n>` if it has none.
///
/// Never fails and never returns an empty string.
pub fn current_thread_identity() -> String {
    IDENTITY_CACHE
        .try_with(|cache| {
            cache
                .borrow_mut()
                .get_or_insert_with(resolve_identity)
                .clone()
        })
        // TLS already torn down (logging from a destructor during thread exit)
        .unwrap_or_else(|_| resolve_identity())
}

fn resolve_identity() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => numeric_identity(&format!("{:?}", thread.id())),
    }
}

/// Turn the `Debug` rendering of a `ThreadId` (`ThreadId(7)`) into `tid:7`.
fn numeric_identity(debug_id: &str) -> String {
    let digits: String = debug_id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        UNKNOWN_THREAD.to_string()
    } else {
        format!("tid:{}", digits)
    }
}
