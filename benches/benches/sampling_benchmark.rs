//! Sampling benchmarks for count, volume and dollar bars.
//!
//! Run with: `cargo bench --package tickbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::BufWriter;
use tempfile::NamedTempFile;
use tickbars_bench::{SyntheticConfig, benchmark_policies, synthetic_records};
use tickbars_lib::{BarSeriesBuilder, CsvFormatter, Formatter};

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn sampling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for size in SIZES {
        let records = synthetic_records(&SyntheticConfig {
            records: size,
            ..SyntheticConfig::default()
        });
        group.throughput(Throughput::Elements(size as u64));

        for (name, policy) in benchmark_policies() {
            group.bench_with_input(BenchmarkId::new(name, size), &records, |b, records| {
                b.iter(|| BarSeriesBuilder::process(black_box(records), policy));
            });
        }
    }

    group.finish();
}

fn streaming_benchmark(c: &mut Criterion) {
    let records = synthetic_records(&SyntheticConfig::default());
    let mut group = c.benchmark_group("push");
    group.throughput(Throughput::Elements(records.len() as u64));

    for (name, policy) in benchmark_policies() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut builder = BarSeriesBuilder::new(policy);
                let emitted = records.iter().filter_map(|r| builder.push(r)).count();
                black_box((emitted, builder.finish()))
            });
        });
    }

    group.finish();
}

fn write_benchmark(c: &mut Criterion) {
    let records = synthetic_records(&SyntheticConfig::default());
    let mut group = c.benchmark_group("write");

    for (name, policy) in benchmark_policies() {
        let bars = BarSeriesBuilder::process(&records, policy);
        group.throughput(Throughput::Elements(bars.len() as u64));
        group.bench_function(BenchmarkId::new("csv", name), |b| {
            b.iter(|| {
                let file = NamedTempFile::new().unwrap();
                CsvFormatter::new()
                    .write_bars(bars.bars(), BufWriter::new(file.as_file()))
                    .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    sampling_benchmark,
    streaming_benchmark,
    write_benchmark
);
criterion_main!(benches);
