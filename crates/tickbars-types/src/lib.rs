//! Core types for the tickbars bar sampler.
//!
//! This crate provides the fundamental data structures used throughout tickbars:
//!
//! - [`Record`] - A timestamped open/high/low/close/volume observation
//! - [`ColumnNames`] - Names of the input fields a record is read from
//! - [`FieldAccess`] - Field-addressable input rows
//! - [`SamplingMethod`] - What a bar threshold is measured in
//! - [`TickbarsError`] - Configuration, schema and type errors

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod columns;
mod error;
mod field;
mod method;
mod record;

pub use columns::ColumnNames;
pub use error::{ConfigError, Result, TickbarsError};
pub use field::{FieldAccess, FieldValue, parse_timestamp};
pub use method::SamplingMethod;
pub use record::Record;
