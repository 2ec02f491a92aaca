//! Criterion benchmarks for rust_seq_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_seq_logger::core::{encode_batch, encode_entry};
use rust_seq_logger::prelude::*;
use std::sync::Arc;
use std::time::Duration;

struct NullTransport;

impl Transport for NullTransport {
    fn send_batch(&self, body: &str) -> Result<()> {
        black_box(body.len());
        Ok(())
    }

    fn health_check(&self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    fn endpoint(&self) -> &str {
        "null"
    }
}

struct NullConsole;

impl Appender for NullConsole {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        black_box(entry.console_line());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Runtime that drains frequently so queues stay small while benchmarking
fn bench_runtime() -> Arc<LoggingRuntime> {
    let runtime = LoggingRuntime::builder()
        .console(NullConsole)
        .transport(Arc::new(NullTransport))
        .build();
    runtime.init(
        SeqConfig::new("127.0.0.1:5341")
            .with_console_level(LogLevel::Warning)
            .with_remote_level(LogLevel::Verbose)
            .with_dispatch_interval(Duration::from_millis(10)),
    );
    Arc::new(runtime)
}

fn sample_entry() -> LogEntry {
    let context = LogContext::new(
        LogLevel::Info,
        Arc::from("Bench"),
        vec![
            Property::new("OrderId", 1042),
            Property::new("Customer", "ACME \"Widgets\""),
            Property::new("Total", 99.5),
        ],
    );
    LogEntry::new("Order {OrderId} placed by {Customer}".to_string(), context)
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    let runtime = bench_runtime();

    group.bench_function("create_and_drop", |b| {
        b.iter(|| {
            let logger = runtime.logger(black_box("Transient"));
            black_box(logger.id())
        });
    });

    group.bench_function("builder_with_enricher", |b| {
        b.iter(|| {
            let logger = runtime
                .logger_builder(black_box("Built"))
                .property("Component", "bench")
                .enricher(ThreadIdEnricher)
                .build();
            black_box(logger.id())
        });
    });

    group.finish();
    runtime.shutdown();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let runtime = bench_runtime();
    let logger = runtime.logger("Bench");

    group.bench_function("rejected", |b| {
        logger.set_remote_level(LogLevel::Error);
        b.iter(|| {
            logger.debug(black_box("This should be filtered"));
        });
        logger.set_remote_level(LogLevel::Verbose);
    });

    group.bench_function("remote_only", |b| {
        b.iter(|| {
            logger.info(black_box("Queued message"));
        });
    });

    group.bench_function("console_and_remote", |b| {
        b.iter(|| {
            logger.error(black_box("Console and queue"));
        });
    });

    group.bench_function("with_properties", |b| {
        b.iter(|| {
            logger.info_with(
                black_box("User {UserId} logged in from {Address}"),
                props!["UserId" => 42, "Address" => "10.0.0.7"],
            );
        });
    });

    group.bench_function("with_enrichers", |b| {
        let enriched = runtime
            .logger_builder("Enriched")
            .enricher(ThreadIdEnricher)
            .enricher(CounterEnricher::new("Counter", u64::MAX, LevelAdjustment::Keep))
            .build();
        b.iter(|| {
            enriched.info(black_box("Enriched message"));
        });
    });

    group.finish();
    drop(logger);
    runtime.shutdown();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let runtime = bench_runtime();

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let runtime = Arc::clone(&runtime);
                    std::thread::spawn(move || {
                        let logger = runtime.logger(&format!("Thread{}", t));
                        for _ in 0..100 {
                            logger.info(black_box("Concurrent message"));
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
    runtime.shutdown();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let entry = sample_entry();
    group.throughput(Throughput::Elements(1));
    group.bench_function("clef_entry", |b| {
        b.iter(|| black_box(encode_entry(black_box(&entry)).unwrap()));
    });

    group.bench_function("console_line", |b| {
        b.iter(|| black_box(entry.console_line()));
    });

    let batch: Vec<LogEntry> = (0..100).map(|_| sample_entry()).collect();
    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("clef_batch_100", |b| {
        b.iter(|| black_box(encode_batch(black_box(&batch)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_concurrent_logging,
    bench_encoding,
);

criterion_main!(benches);
