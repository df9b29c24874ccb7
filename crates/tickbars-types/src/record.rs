//! Input record representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ColumnNames, FieldAccess, Result, TickbarsError};

/// A single timestamped price/volume observation (a tick or a candle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Timestamp of the record (UTC).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Creates a tick-style record where all four prices equal `price`.
    #[must_use]
    pub const fn tick(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self::new(timestamp, price, price, price, price, volume)
    }

    /// Returns the traded notional value (close x volume).
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.close * self.volume
    }

    /// Reads a record from a field-addressable row.
    ///
    /// `row` is the zero-based position of the row, used in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`TickbarsError::Schema`] if a required column is absent and
    /// [`TickbarsError::Type`] if a price or volume is not a finite number or
    /// the time key is not a recognizable instant.
    pub fn from_fields<R>(fields: &R, columns: &ColumnNames, row: usize) -> Result<Self>
    where
        R: FieldAccess + ?Sized,
    {
        let time = fields
            .field(&columns.time)
            .ok_or_else(|| TickbarsError::missing_column(&columns.time, Some(row)))?;
        let timestamp = time
            .as_timestamp()
            .ok_or_else(|| TickbarsError::invalid_value(&columns.time, Some(row), time.to_string()))?;

        let number = |name: &str| -> Result<f64> {
            let value = fields
                .field(name)
                .ok_or_else(|| TickbarsError::missing_column(name, Some(row)))?;
            value
                .as_f64()
                .ok_or_else(|| TickbarsError::invalid_value(name, Some(row), value.to_string()))
        };

        Ok(Self {
            timestamp,
            open: number(&columns.open)?,
            high: number(&columns.high)?,
            low: number(&columns.low)?,
            close: number(&columns.close)?,
            volume: number(&columns.volume)?,
        })
    }
}
