//! Criterion benchmarks for rust_queue_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_queue_logger::prelude::*;
use rust_queue_logger::{info, BoundedQueue, Formatter};
use std::sync::Arc;
use tempfile::TempDir;

fn quiet_logger() -> Logger {
    Logger::builder()
        .console(ConsoleAppender::with_writer(std::io::sink()))
        .build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("console_only", |b| {
        b.iter(|| {
            let logger = quiet_logger();
            black_box(logger)
        });
    });

    group.bench_function("with_file_sink", |b| {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("creation.log");
        b.iter(|| {
            let mut logger = Logger::builder().without_console().build();
            logger.init(&path, LogLevel::Info).expect("init");
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let formatter = Formatter::default();

    group.bench_function("plain_message", |b| {
        b.iter(|| {
            let record = formatter.format(
                black_box(LogLevel::Info),
                black_box("main"),
                black_box("Request handled"),
            );
            black_box(record)
        });
    });

    group.bench_function("format_args", |b| {
        b.iter(|| {
            let record = formatter.format_args(
                LogLevel::Info,
                "main",
                format_args!("user {} took {} ms", black_box(42), black_box(17)),
            );
            black_box(record)
        });
    });

    group.bench_function("escaped_message", |b| {
        b.iter(|| {
            let record = formatter.format(
                LogLevel::Warn,
                "main",
                black_box("line one\nline two\tcolumn\r"),
            );
            black_box(record)
        });
    });

    let long_message = "x".repeat(4096);
    group.bench_function("truncated_message", |b| {
        b.iter(|| {
            let record = formatter.format(LogLevel::Error, "main", black_box(&long_message));
            black_box(record)
        });
    });

    group.finish();
}

// ============================================================================
// Queue Benchmarks
// ============================================================================

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_queue");
    group.throughput(Throughput::Elements(1));

    let mut queue = BoundedQueue::new(1024, 1024);
    group.bench_function("push_pop", |b| {
        b.iter(|| {
            queue.push(black_box("2024-01-01 00:00:00.000 INFO [main] queued\n"));
            black_box(queue.pop())
        });
    });

    let mut full = BoundedQueue::new(1, 1024);
    full.push("occupied");
    group.bench_function("push_rejected", |b| {
        b.iter(|| black_box(full.push(black_box("rejected"))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_console_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_logging");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger();

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.bench_function("info_macro", |b| {
        b.iter(|| {
            info!(logger, "Processing {} items", black_box(100));
        });
    });

    group.finish();
}

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));

    let dir = TempDir::new().expect("temp dir");
    let mut logger = Logger::builder()
        .without_console()
        .queue_capacity(65_536)
        .build();
    logger
        .init(dir.path().join("bench.log"), LogLevel::Debug)
        .expect("init");

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.bench_function("error", |b| {
        b.iter(|| {
            logger.error(black_box("Error message"));
        });
    });

    group.finish();
    logger.shutdown();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let dir = TempDir::new().expect("temp dir");
    let mut logger = Logger::builder()
        .without_console()
        .queue_capacity(65_536)
        .build();
    logger
        .init(dir.path().join("concurrent.log"), LogLevel::Info)
        .expect("init");
    let logger = Arc::new(logger);

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for _ in 0..100 {
                            logger.info(black_box("Concurrent message"));
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().expect("producer panicked");
            }
        });
    });

    group.finish();
    logger.shutdown();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger();
    logger.set_min_level(LogLevel::Warn);

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("This should be filtered"));
        });
    });

    group.bench_function("below_threshold_macro", |b| {
        b.iter(|| {
            rust_queue_logger::debug!(logger, "filtered {}", black_box(1));
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(black_box("This should be logged"));
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_formatting,
    bench_queue,
    bench_console_logging,
    bench_file_logging,
    bench_concurrent_logging,
    bench_level_filtering
);

criterion_main!(benches);
