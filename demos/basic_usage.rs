//! Basic logger usage example
//!
//! Demonstrates console logging and level filtering.
//!
//! Run with: cargo run --example basic_usage

use rust_queue_logger::prelude::*;
use rust_queue_logger::{info, warn};

fn main() {
    println!("=== Rust Queue Logger - Basic Usage Example ===\n");

    // Console-only until init() starts the file sink
    let logger = Logger::builder().use_colors(true).build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Formatted messages:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n3. Raising the minimum level to INFO:");
    logger.set_min_level(LogLevel::Info);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.warn("Warning message (visible)");

    println!("\n4. Newlines cannot forge extra entries:");
    logger.info("user input\nERROR fake entry");

    println!("\n=== Example completed successfully! ===");
}
