//! Record input and bar output formats for tickbars.
//!
//! Each formatter reads [`Record`](tickbars_types::Record)s through the
//! shared [`FieldAccess`](tickbars_types::FieldAccess) validation path and
//! writes [`Bar`](tickbars_aggregate::Bar)s:
//!
//! - [`CsvFormatter`] - CSV/TSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{DataFormat, FormatError, Formatter};
pub use json::{JsonFormatter, JsonStyle};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
