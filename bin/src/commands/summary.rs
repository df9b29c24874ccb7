//! Summary command implementation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use tickbars_lib::prelude::*;

use crate::display::{self, Format};

/// Aggregate statistics over a record set.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RecordStats {
    pub(crate) records: usize,
    pub(crate) first: Option<DateTime<Utc>>,
    pub(crate) last: Option<DateTime<Utc>>,
    pub(crate) total_volume: f64,
    pub(crate) total_notional: f64,
}

impl RecordStats {
    pub(crate) fn collect(records: &[Record]) -> Self {
        Self {
            records: records.len(),
            first: records.first().map(|r| r.timestamp),
            last: records.last().map(|r| r.timestamp),
            total_volume: records.iter().map(|r| r.volume).sum(),
            total_notional: records.iter().map(Record::notional).sum(),
        }
    }

    /// Number of bars each method would emit at the given threshold, ignoring
    /// boundary effects.
    pub(crate) fn estimated_bars(&self, policy: &SamplingPolicy) -> f64 {
        let total = match policy.method() {
            SamplingMethod::Count => self.records as f64,
            SamplingMethod::Volume => self.total_volume,
            SamplingMethod::Dollar => self.total_notional,
        };
        (total / policy.threshold()).floor()
    }
}

/// Print record statistics for an input file.
pub(crate) async fn summary(
    input: &Path,
    input_format: Option<Format>,
    columns: ColumnNames,
) -> Result<()> {
    let format = Format::resolve(input_format, input)?;
    let records = display::read_records(input, format, &columns).await?;
    let stats = RecordStats::collect(&records);

    println!("File:     {}", input.display());
    println!("Format:   {format}");
    println!("Records:  {}", stats.records);
    if let (Some(first), Some(last)) = (stats.first, stats.last) {
        println!("First:    {}", first.to_rfc3339());
        println!("Last:     {}", last.to_rfc3339());
    }
    println!("Volume:   {:.4}", stats.total_volume);
    println!("Notional: {:.4}", stats.total_notional);

    println!(
        "\nDefault dollar bars ({}): {}",
        SamplingPolicy::DEFAULT_DOLLAR_THRESHOLD,
        stats.estimated_bars(&SamplingPolicy::default_dollar())
    );

    Ok(())
}
