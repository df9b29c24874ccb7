//! Count, volume and dollar OHLC bar sampling from tick and candle data.
//!
//! This is a facade crate that re-exports functionality from the tickbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use tickbars_lib::prelude::*;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
//! let records: Vec<Record> = (0..5)
//!     .map(|i| Record::tick(start + TimeDelta::seconds(i), 100.0, 1.0))
//!     .collect();
//!
//! let policy: SamplingPolicy = "volume:2".parse()?;
//! let bars = BarSeriesBuilder::process(&records, policy);
//!
//! // The fifth record never completes a window and is dropped.
//! assert_eq!(bars.len(), 2);
//! # Ok::<(), ConfigError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbars_types::*;

// Re-export the sampling engine
pub use tickbars_aggregate::{
    Accumulator, Bar, BarSequence, BarSeriesBuilder, SamplingPolicy, Threshold, WindowSnapshot,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbars_format::{
    CsvFormatter, DataFormat, FormatError, Formatter, JsonFormatter, JsonStyle,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use tickbars_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use tickbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbars_types::{
        ColumnNames, ConfigError, FieldAccess, Record, Result, SamplingMethod, TickbarsError,
    };

    pub use tickbars_aggregate::{Bar, BarSequence, BarSeriesBuilder, SamplingPolicy};

    #[cfg(feature = "format")]
    pub use tickbars_format::{CsvFormatter, DataFormat, Formatter, JsonFormatter};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use tickbars_format::ParquetFormatter;
}
