//! Benchmark utilities for tickbars.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tickbars_lib::{Record, SamplingPolicy};

/// Configuration for a synthetic record stream.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticConfig {
    /// Number of records to generate.
    pub records: usize,
    /// Starting price.
    pub start_price: f64,
    /// Maximum relative price move per record.
    pub step: f64,
    /// Maximum volume per record.
    pub max_volume: f64,
    /// Seed for the pseudo-random walk.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            records: 100_000,
            start_price: 1.1,
            step: 0.0005,
            max_volume: 10.0,
            seed: 0x5eed,
        }
    }
}

/// Generate a random-walk record stream with one record per second.
pub fn synthetic_records(config: &SyntheticConfig) -> Vec<Record> {
    let start: DateTime<Utc> = Utc
        .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut price = config.start_price;

    (0..config.records)
        .map(|i| {
            let open = price;
            let close = open * (1.0 + rng.random_range(-config.step..config.step));
            let spread = open.max(close) * config.step * rng.random::<f64>();
            let volume = rng.random_range(0.01..1.0) * config.max_volume;
            price = close;
            Record::new(
                start + TimeDelta::seconds(i as i64),
                open,
                open.max(close) + spread,
                open.min(close) - spread,
                close,
                volume,
            )
        })
        .collect()
}

/// Policies exercised by the benchmarks, labelled for reporting.
///
/// Thresholds are chosen so each policy emits roughly one bar per 100 records
/// of the default synthetic stream.
pub fn benchmark_policies() -> [(&'static str, SamplingPolicy); 3] {
    [
        ("count", SamplingPolicy::count(100).expect("valid benchmark policy")),
        ("volume", SamplingPolicy::volume(500.0).expect("valid benchmark policy")),
        ("dollar", SamplingPolicy::dollar(550.0).expect("valid benchmark policy")),
    ]
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1_000 {
        format!("{micros}us")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Records processed per second.
pub fn records_per_sec(records: usize, d: Duration) -> f64 {
    let secs = d.as_secs_f64();
    if secs > 0.0 { records as f64 / secs } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickbars_lib::SamplingMethod;

    #[test]
    fn test_synthetic_records_are_valid() {
        let records = synthetic_records(&SyntheticConfig {
            records: 1_000,
            ..SyntheticConfig::default()
        });

        assert_eq!(records.len(), 1_000);
        for pair in records.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for r in &records {
            assert!(r.low <= r.open.min(r.close));
            assert!(r.high >= r.open.max(r.close));
            assert!(r.volume > 0.0);
        }
    }

    #[test]
    fn test_synthetic_records_are_reproducible() {
        let config = SyntheticConfig {
            records: 50,
            ..SyntheticConfig::default()
        };
        assert_eq!(synthetic_records(&config), synthetic_records(&config));
    }

    #[test]
    fn test_seed_changes_stream() {
        let config = SyntheticConfig {
            records: 50,
            ..SyntheticConfig::default()
        };
        let other = SyntheticConfig { seed: 7, ..config };
        assert_ne!(synthetic_records(&config), synthetic_records(&other));
    }

    #[test]
    fn test_benchmark_policies_cover_every_method() {
        let methods: Vec<_> = benchmark_policies()
            .iter()
            .map(|(name, policy)| {
                assert_eq!(*name, policy.method().as_str());
                policy.method()
            })
            .collect();
        assert_eq!(methods, SamplingMethod::all());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250us");
        assert_eq!(format_duration(Duration::from_millis(15)), "15.00ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
    }
}
