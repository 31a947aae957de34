//! Async logging example
//!
//! Demonstrates many threads sharing one logger, and what happens when the
//! bounded queue fills faster than the writer drains it.
//!
//! Run with: cargo run --example async_logging

use rust_queue_logger::info;
use rust_queue_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - Async Logging Example ===\n");

    // Small queue and no console so producers outrun the writer
    let mut logger = Logger::builder()
        .without_console()
        .queue_capacity(64)
        .build();
    logger.init("async_test.log", LogLevel::Info)?;
    let logger = Arc::new(logger);

    println!("1. Multi-threaded logging:");
    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::Builder::new()
                .name(format!("producer-{}", thread_id))
                .spawn(move || {
                    for i in 0..2_000 {
                        info!(logger, "Thread {} - Message {}", thread_id, i);
                    }
                })
        })
        .collect::<std::io::Result<_>>()?;

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("producer thread panicked");
        }
    }
    println!("   5 threads logged 2000 messages each");

    logger.shutdown();

    let metrics = logger.metrics();
    println!("\n2. Queue accounting:");
    println!("   written:   {}", metrics.records_written());
    println!("   dropped:   {}", metrics.dropped_count());
    println!("   drop rate: {:.2}%", metrics.drop_rate());

    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_test.log' for file output");

    Ok(())
}
