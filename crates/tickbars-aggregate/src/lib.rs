//! Information-driven OHLC bar sampling for tickbars.
//!
//! This crate provides the streaming aggregation engine:
//!
//! - [`Accumulator`] - Running OHLC/volume/notional state for one window
//! - [`SamplingPolicy`] - Count, volume or dollar flush condition
//! - [`BarSeriesBuilder`] - Drives records through the accumulator and policy
//! - [`BarSequence`] - Ordered, timestamp-keyed output bars

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod bar;
mod builder;
mod policy;
mod sequence;

pub use accumulator::{Accumulator, WindowSnapshot};
pub use bar::Bar;
pub use builder::BarSeriesBuilder;
pub use policy::{SamplingPolicy, Threshold};
pub use sequence::BarSequence;
