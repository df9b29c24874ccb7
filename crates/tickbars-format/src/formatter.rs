//! Data format abstraction.

use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::path::Path;

use tickbars_aggregate::Bar;
use tickbars_types::TickbarsError;
use thiserror::Error;

/// Data format identifier, used for both record input and bar output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl DataFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson, Self::Parquet]
    }

    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for DataFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while reading records or writing bars.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown data format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Input rows failed schema or type validation.
    #[error(transparent)]
    Records(#[from] TickbarsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for bar output formatters.
pub trait Formatter: Send + Sync {
    /// Writes bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Returns true if any bar carries notional, i.e. the notional column is needed.
pub(crate) fn has_notional(bars: &[Bar]) -> bool {
    bars.iter().any(|bar| bar.notional.is_some())
}

/// Renders a bar timestamp as RFC 3339 UTC, with sub-second digits only when present.
pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            DataFormat::from_path(Path::new("data/ticks.CSV")),
            Some(DataFormat::Csv)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("bars.jsonl")),
            Some(DataFormat::Ndjson)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("bars.pq")),
            Some(DataFormat::Parquet)
        );
        assert_eq!(DataFormat::from_path(Path::new("bars")), None);
        assert_eq!(DataFormat::from_path(Path::new("bars.xlsx")), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "xml".parse::<DataFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }
}
