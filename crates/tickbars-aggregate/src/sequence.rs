//! Ordered, timestamp-keyed bar collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Bar;

/// Bars in emission order, keyed by the timestamp of each bar's last record.
///
/// Timestamps are strictly increasing as delivered by
/// [`BarSeriesBuilder`](crate::BarSeriesBuilder); this is assumed, not
/// re-checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarSequence {
    bars: Vec<Bar>,
}

impl BarSequence {
    /// Wraps bars that are already in strictly increasing timestamp order.
    #[must_use]
    pub const fn from_ordered(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if no bar was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the bars as a slice.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Iterates over `(timestamp, bar)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &Bar)> + '_ {
        self.bars.iter().map(|bar| (bar.timestamp, bar))
    }

    /// Returns the bar keyed by `timestamp`, if any.
    #[must_use]
    pub fn get(&self, timestamp: DateTime<Utc>) -> Option<&Bar> {
        self.bars
            .binary_search_by_key(&timestamp, |bar| bar.timestamp)
            .ok()
            .map(|index| &self.bars[index])
    }

    /// Returns the earliest bar.
    #[must_use]
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    /// Returns the latest bar.
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Consumes the sequence, returning the bars.
    #[must_use]
    pub fn into_vec(self) -> Vec<Bar> {
        self.bars
    }
}

impl IntoIterator for BarSequence {
    type Item = Bar;
    type IntoIter = std::vec::IntoIter<Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter()
    }
}

impl<'a> IntoIterator for &'a BarSequence {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
