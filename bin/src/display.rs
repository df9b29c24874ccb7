//! Display utilities and input/output plumbing for the tickbars CLI.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tickbars_lib::prelude::*;

/// Data format for input records and output bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Infers the format from a path's extension.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let is_tsv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            return Some(Self::Tsv);
        }
        DataFormat::from_path(path).map(|format| match format {
            DataFormat::Csv => Self::Csv,
            DataFormat::Json => Self::Json,
            DataFormat::Ndjson => Self::Ndjson,
            DataFormat::Parquet => Self::Parquet,
        })
    }

    /// Resolves an explicit format or falls back to the path's extension.
    pub(crate) fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self> {
        match explicit.or_else(|| Self::from_path(path)) {
            Some(format) => Ok(format),
            None => bail!(
                "Cannot infer format of {}; pass it explicitly (csv, tsv, json, ndjson, parquet)",
                path.display()
            ),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Read records from a file in the specified format.
pub(crate) async fn read_records(
    input: &Path,
    format: Format,
    columns: &ColumnNames,
) -> Result<Vec<Record>> {
    let records = match format {
        Format::Csv | Format::Tsv => {
            let file = tokio::fs::File::open(input)
                .await
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let formatter = if format == Format::Tsv {
                CsvFormatter::tsv()
            } else {
                CsvFormatter::new()
            };
            formatter.read_records(file, columns).await?
        }
        Format::Json | Format::Ndjson => {
            let file = File::open(input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let formatter = if format == Format::Ndjson {
                JsonFormatter::ndjson()
            } else {
                JsonFormatter::new()
            };
            formatter.read_records(std::io::BufReader::new(file), columns)?
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let file = File::open(input)
                    .with_context(|| format!("Failed to open {}", input.display()))?;
                ParquetFormatter::new().read_records(file, columns)?
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    };

    tracing::info!(records = records.len(), input = %input.display(), "loaded records");
    Ok(records)
}

/// Sample records into bars, reporting progress unless `quiet`.
///
/// Returns the bars and the number of trailing records that formed no bar.
pub(crate) fn sample_records(
    records: &[Record],
    policy: SamplingPolicy,
    quiet: bool,
) -> (BarSequence, usize) {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(policy.to_string());
        pb
    };

    let mut builder = BarSeriesBuilder::new(policy);
    let mut bars = Vec::new();
    for record in records {
        if let Some(bar) = builder.push(record) {
            bars.push(bar);
        }
        progress.inc(1);
    }
    let dropped = builder.finish();

    progress.finish_with_message(format!("{} bars", bars.len()));
    (BarSequence::from_ordered(bars), dropped)
}

/// Write bars to a file in the specified format.
pub(crate) fn write_bars(
    bars: &BarSequence,
    output: &Path,
    format: Format,
    time_column: &str,
) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new().with_time_column(time_column);
            formatter.write_bars(bars.bars(), writer)?;
        }
        Format::Tsv => {
            let formatter = CsvFormatter::tsv().with_time_column(time_column);
            formatter.write_bars(bars.bars(), writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new().with_time_column(time_column);
            formatter.write_bars(bars.bars(), writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson().with_time_column(time_column);
            formatter.write_bars(bars.bars(), writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new().with_time_column(time_column);
                formatter.write_bars(bars.bars(), writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}
