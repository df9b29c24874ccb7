//! OHLC bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An aggregated OHLC bar summarizing one sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Timestamp of the last record in the window.
    pub timestamp: DateTime<Utc>,
    /// Open of the first record in the window.
    pub open: f64,
    /// Highest high in the window.
    pub high: f64,
    /// Lowest low in the window.
    pub low: f64,
    /// Close of the last record in the window.
    pub close: f64,
    /// Total volume traded in the window.
    pub volume: f64,
    /// Total notional (close x volume) traded in the window.
    ///
    /// Only present on dollar-sampled bars.
    #[serde(default, alias = "dollar", skip_serializing_if = "Option::is_none")]
    pub notional: Option<f64>,
    /// Number of records in the window.
    pub record_count: u64,
}

impl Bar {
    /// Creates a new bar without notional.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        record_count: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            notional: None,
            record_count,
        }
    }

    /// Attaches the window's cumulative notional.
    #[must_use]
    pub const fn with_notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}
