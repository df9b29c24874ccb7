//! tickbars CLI - Count, volume and dollar bar sampling for tick and candle files.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbars_lib::prelude::*;
use tracing::Level;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbars")]
#[command(about = "Sample tick and candle data into count, volume and dollar bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an input file into bars
    Sample {
        /// Input file (csv, tsv, json, ndjson or parquet)
        input: PathBuf,

        /// Sampling method (count, volume, dollar)
        #[arg(short, long, default_value = "volume")]
        policy: SamplingMethod,

        /// Threshold per bar. Required for count and volume; dollar defaults to 10000.
        #[arg(long)]
        frequency: Option<String>,

        /// Output file path. Defaults to <input stem>.<policy>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the output extension, then csv)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Input format (defaults to the input extension)
        #[arg(long, value_enum)]
        input_format: Option<Format>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Summarize an input file without sampling
    Summary {
        /// Input file (csv, tsv, json, ndjson or parquet)
        input: PathBuf,

        /// Input format (defaults to the input extension)
        #[arg(long, value_enum)]
        input_format: Option<Format>,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

/// Input column name overrides.
#[derive(Args)]
struct ColumnArgs {
    /// Name of the timestamp column
    #[arg(long, default_value = ColumnNames::DEFAULT_TIME)]
    time_column: String,

    /// Name of the open column
    #[arg(long, default_value = "open")]
    open_column: String,

    /// Name of the high column
    #[arg(long, default_value = "high")]
    high_column: String,

    /// Name of the low column
    #[arg(long, default_value = "low")]
    low_column: String,

    /// Name of the close column
    #[arg(long, default_value = "close")]
    close_column: String,

    /// Name of the volume column
    #[arg(long, default_value = "volume")]
    volume_column: String,
}

impl ColumnArgs {
    fn into_names(self) -> ColumnNames {
        ColumnNames::new()
            .with_time(self.time_column)
            .with_open(self.open_column)
            .with_high(self.high_column)
            .with_low(self.low_column)
            .with_close(self.close_column)
            .with_volume(self.volume_column)
    }
}

const fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Sample {
            input,
            policy,
            frequency,
            output,
            format,
            input_format,
            columns,
        } => {
            commands::sample::sample(
                &input,
                policy,
                frequency.as_deref(),
                output,
                format,
                input_format,
                columns.into_names(),
                cli.quiet,
            )
            .await
        }
        Commands::Summary {
            input,
            input_format,
            columns,
        } => commands::summary::summary(&input, input_format, columns.into_names()).await,
    }
}
