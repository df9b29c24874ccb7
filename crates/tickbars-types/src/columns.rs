//! Input column naming.

use serde::{Deserialize, Serialize};

/// Names of the input fields a [`Record`](crate::Record) is read from.
///
/// Defaults match the conventional candlestick layout: `datetime`, `open`,
/// `high`, `low`, `close` and `volume`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Time key column.
    #[serde(alias = "timecolumn")]
    pub time: String,
    /// Open price column.
    pub open: String,
    /// High price column.
    pub high: String,
    /// Low price column.
    pub low: String,
    /// Close price column.
    pub close: String,
    /// Volume column.
    #[serde(alias = "volume_column")]
    pub volume: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            time: Self::DEFAULT_TIME.to_string(),
            open: "open".to_string(),
            high: "high".to_string(),
            low: "low".to_string(),
            close: "close".to_string(),
            volume: "volume".to_string(),
        }
    }
}

impl ColumnNames {
    /// Default name of the time key column.
    pub const DEFAULT_TIME: &'static str = "datetime";

    /// Creates the default column mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time key column.
    #[must_use]
    pub fn with_time(mut self, name: impl Into<String>) -> Self {
        self.time = name.into();
        self
    }

    /// Sets the open price column.
    #[must_use]
    pub fn with_open(mut self, name: impl Into<String>) -> Self {
        self.open = name.into();
        self
    }

    /// Sets the high price column.
    #[must_use]
    pub fn with_high(mut self, name: impl Into<String>) -> Self {
        self.high = name.into();
        self
    }

    /// Sets the low price column.
    #[must_use]
    pub fn with_low(mut self, name: impl Into<String>) -> Self {
        self.low = name.into();
        self
    }

    /// Sets the close price column.
    #[must_use]
    pub fn with_close(mut self, name: impl Into<String>) -> Self {
        self.close = name.into();
        self
    }

    /// Sets the volume column.
    #[must_use]
    pub fn with_volume(mut self, name: impl Into<String>) -> Self {
        self.volume = name.into();
        self
    }

    /// Returns every required column, time key first.
    #[must_use]
    pub fn required(&self) -> [&str; 6] {
        [
            self.time.as_str(),
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.close.as_str(),
            self.volume.as_str(),
        ]
    }

    /// Returns the first required column that `has_column` rejects.
    pub fn first_missing<'a>(&'a self, mut has_column: impl FnMut(&str) -> bool) -> Option<&'a str> {
        self.required().into_iter().find(|name| !has_column(name))
    }
}
