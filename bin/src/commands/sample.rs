//! Sample command implementation.
//!
//! Reads records from an input file, samples them into bars with the chosen
//! policy and writes the bars to an output file.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tickbars_lib::prelude::*;

use crate::display::{self, Format};

/// Build the sampling policy from the CLI method and optional frequency.
pub(crate) fn resolve_policy(
    method: SamplingMethod,
    frequency: Option<&str>,
) -> Result<SamplingPolicy> {
    match (method, frequency) {
        (_, Some(frequency)) => SamplingPolicy::parse(method, frequency)
            .with_context(|| format!("Invalid {method} frequency")),
        (SamplingMethod::Dollar, None) => Ok(SamplingPolicy::default_dollar()),
        (method, None) => bail!("--frequency is required for {method} bars"),
    }
}

/// Default output path: `<input stem>.<method>.<extension>` next to the input.
fn default_output(input: &Path, method: SamplingMethod, format: Format) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bars");
    input.with_file_name(format!("{stem}.{method}.{}", format.extension()))
}

/// Sample an input file into bars.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn sample(
    input: &Path,
    method: SamplingMethod,
    frequency: Option<&str>,
    output: Option<PathBuf>,
    format: Option<Format>,
    input_format: Option<Format>,
    columns: ColumnNames,
    quiet: bool,
) -> Result<()> {
    let policy = resolve_policy(method, frequency)?;
    let input_format = Format::resolve(input_format, input)?;

    let format = format
        .or_else(|| output.as_deref().and_then(Format::from_path))
        .unwrap_or(Format::Csv);
    let output = output.unwrap_or_else(|| default_output(input, method, format));

    if !quiet {
        println!("Sampling {} with {policy}", input.display());
    }

    let records = display::read_records(input, input_format, &columns).await?;
    let (bars, dropped) = display::sample_records(&records, policy, quiet);

    tracing::info!(
        bars = bars.len(),
        dropped,
        policy = %policy,
        "sampling complete"
    );

    display::write_bars(&bars, &output, format, &columns.time)?;

    if !quiet {
        println!(
            "Wrote {} bars from {} records to {}",
            bars.len(),
            records.len(),
            output.display()
        );
        if dropped > 0 {
            println!("Discarded {dropped} trailing records that did not complete a bar");
        }
    }

    Ok(())
}
