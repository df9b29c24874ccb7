//! Error types for tickbars.

use thiserror::Error;

use crate::SamplingMethod;

/// Result type alias for tickbars operations.
pub type Result<T> = std::result::Result<T, TickbarsError>;

/// Errors that can occur while validating input or sampling bars.
#[derive(Error, Debug)]
pub enum TickbarsError {
    /// Invalid sampling configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required field is missing from the input.
    #[error("Missing required column '{column}'{}", row_suffix(.row))]
    Schema {
        /// Name of the missing column.
        column: String,
        /// Zero-based row index, or `None` when detected from a header or schema.
        row: Option<usize>,
    },

    /// A required field holds a value of the wrong kind.
    #[error("Column '{column}' has invalid value '{value}'{}", row_suffix(.row))]
    Type {
        /// Name of the offending column.
        column: String,
        /// Zero-based row index, or `None` when detected from a schema.
        row: Option<usize>,
        /// Textual rendering of the offending value.
        value: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TickbarsError {
    /// Creates a schema error for a column missing at `row`.
    #[must_use]
    pub fn missing_column(column: impl Into<String>, row: Option<usize>) -> Self {
        Self::Schema {
            column: column.into(),
            row,
        }
    }

    /// Creates a type error for `value` found in `column` at `row`.
    #[must_use]
    pub fn invalid_value(
        column: impl Into<String>,
        row: Option<usize>,
        value: impl Into<String>,
    ) -> Self {
        Self::Type {
            column: column.into(),
            row,
            value: value.into(),
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

/// Error for invalid sampling policy parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold is zero, negative, NaN or infinite.
    #[error("Invalid {method} threshold {threshold}: must be a positive finite number")]
    NonPositiveThreshold {
        /// The sampling method the threshold was given for.
        method: SamplingMethod,
        /// The rejected threshold.
        threshold: f64,
    },

    /// Count threshold is not a whole number.
    #[error("Invalid count threshold {0}: must be a positive integer")]
    FractionalCount(f64),

    /// Threshold could not be parsed as a number.
    #[error("Invalid {method} threshold '{value}': not a number")]
    NonNumericThreshold {
        /// The sampling method the threshold was given for.
        method: SamplingMethod,
        /// The unparsable input.
        value: String,
    },

    /// Unknown sampling method name.
    #[error("Unknown sampling method '{0}', expected one of: count, volume, dollar")]
    UnknownMethod(String),
}
