//! Aggregation and ingestion benchmarks.
//!
//! Run with: `cargo bench --package kline-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kline_bench::{synthetic_series, to_csv};
use kline_lib::{DailyAggregator, IngestConfig, aggregate_daily, read_bars};
use std::hint::black_box;

/// Series sizes in trading days.
const SIZES: &[usize] = &[20, 250, 1_000];

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for &days in SIZES {
        let bars = synthetic_series(days);
        group.throughput(Throughput::Elements(bars.len() as u64));

        group.bench_with_input(BenchmarkId::new("slice", days), &bars, |b, bars| {
            b.iter(|| aggregate_daily(black_box(bars)));
        });

        group.bench_with_input(BenchmarkId::new("streaming", days), &bars, |b, bars| {
            b.iter(|| {
                let mut aggregator = DailyAggregator::new();
                let mut count = 0usize;
                for bar in black_box(bars) {
                    count += usize::from(aggregator.push(bar).is_some());
                }
                count + usize::from(aggregator.finish().is_some())
            });
        });
    }

    group.finish();
}

fn ingest_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");
    let mut group = c.benchmark_group("ingest");

    for &days in SIZES {
        let csv = to_csv(&synthetic_series(days));
        group.throughput(Throughput::Bytes(csv.len() as u64));

        group.bench_with_input(BenchmarkId::new("read_bars", days), &csv, |b, csv| {
            b.iter(|| {
                runtime
                    .block_on(read_bars(black_box(csv.as_bytes()), IngestConfig::default()))
                    .expect("valid csv")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, ingest_benchmark);
criterion_main!(benches);
