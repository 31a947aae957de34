//! File logging example
//!
//! Demonstrates console output alongside the background file sink,
//! configured from JSON.
//!
//! Run with: cargo run --example file_logging

use rust_queue_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "file_path": "application.log",
            "min_level": "Info",
            "queue_capacity": 256,
            "use_colors": true
        }"#,
    )?;

    let mut logger = Logger::from_config(config);
    logger.start()?;

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (below INFO, not written)");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }
    logger.info("All operations completed");

    // Drains the queue, flushes and closes the file
    logger.shutdown();

    let metrics = logger.metrics();
    println!(
        "\nWritten: {}, dropped: {}",
        metrics.records_written(),
        metrics.dropped_count()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
