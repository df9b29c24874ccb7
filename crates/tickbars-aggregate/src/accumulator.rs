//! Running aggregation state for one in-progress bar.

use chrono::{DateTime, Utc};
use tickbars_types::Record;

use crate::Bar;

/// Read-only view of an [`Accumulator`].
///
/// An empty window reports `timestamp == None` and zero sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSnapshot {
    /// Timestamp of the most recently ingested record.
    pub timestamp: Option<DateTime<Utc>>,
    /// Open of the first record.
    pub open: f64,
    /// Running maximum of record highs.
    pub high: f64,
    /// Running minimum of record lows.
    pub low: f64,
    /// Close of the most recent record.
    pub close: f64,
    /// Running volume sum.
    pub volume: f64,
    /// Running sum of close x volume.
    pub notional: f64,
    /// Records ingested since the last reset.
    pub count: u64,
}

impl WindowSnapshot {
    /// Returns true if no record has been ingested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Converts the window into a bar, attaching notional if requested.
    ///
    /// Returns `None` for an empty window.
    #[must_use]
    pub fn to_bar(&self, with_notional: bool) -> Option<Bar> {
        let timestamp = self.timestamp?;
        let bar = Bar::new(
            timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.count,
        );
        Some(if with_notional {
            bar.with_notional(self.notional)
        } else {
            bar
        })
    }
}

/// Mutable OHLC accumulator holding scalar running aggregates.
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestamp: Option<DateTime<Utc>>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    notional: f64,
    count: u64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timestamp: None,
            open: 0.0,
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            close: 0.0,
            volume: 0.0,
            notional: 0.0,
            count: 0,
        }
    }

    /// Folds a record into the window.
    pub fn ingest(&mut self, record: &Record) {
        if self.count == 0 {
            self.open = record.open;
        }
        self.high = self.high.max(record.high);
        self.low = self.low.min(record.low);
        self.close = record.close;
        self.volume += record.volume;
        self.notional += record.notional();
        self.count += 1;
        self.timestamp = Some(record.timestamp);
    }

    /// Clears the window.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns true if no record has been ingested since the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns a read-only view of the window.
    #[must_use]
    pub const fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            timestamp: self.timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            notional: self.notional,
            count: self.count,
        }
    }

    /// Emits the window as a bar and resets.
    ///
    /// Returns `None` (and leaves the accumulator untouched) when empty.
    pub fn take_bar(&mut self, with_notional: bool) -> Option<Bar> {
        let bar = self.snapshot().to_bar(with_notional)?;
        self.reset();
        Some(bar)
    }
}
