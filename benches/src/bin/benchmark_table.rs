//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package tickbars-bench --bin benchmark_table --release`

use std::time::{Duration, Instant};
use tickbars_bench::{
    SyntheticConfig, benchmark_policies, format_duration, records_per_sec, synthetic_records,
};
use tickbars_lib::BarSeriesBuilder;

/// Number of iterations per benchmark for statistical significance.
const ITERATIONS: u32 = 5;

fn main() {
    println!("tickbars Sampling Benchmark");
    println!("===========================\n");
    println!("Running benchmarks ({ITERATIONS} iterations each)...\n");

    let sizes = [("100k records", 100_000), ("1M records", 1_000_000)];

    println!("| Input | Policy | Bars | Avg Time | Records/s |");
    println!("|-------|--------|-----:|---------:|----------:|");

    for (label, size) in sizes {
        let records = synthetic_records(&SyntheticConfig {
            records: size,
            ..SyntheticConfig::default()
        });

        for (_, policy) in benchmark_policies() {
            let mut total = Duration::ZERO;
            let mut bars = 0;
            for _ in 0..ITERATIONS {
                let start = Instant::now();
                bars = BarSeriesBuilder::process(&records, policy).len();
                total += start.elapsed();
            }
            let avg = total / ITERATIONS;
            println!(
                "| {label} | {policy} | {bars} | {} | {:.0} |",
                format_duration(avg),
                records_per_sec(size, avg)
            );
        }
    }
}
