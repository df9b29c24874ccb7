//! Record-to-bar sampling.

use tickbars_types::{ColumnNames, FieldAccess, Record, Result};

use crate::{Accumulator, Bar, BarSequence, SamplingPolicy, WindowSnapshot};

/// Drives an [`Accumulator`] with a [`SamplingPolicy`].
///
/// Records are ingested one at a time; whenever the policy reports the window
/// complete, a [`Bar`] is emitted and the accumulator is reset. A trailing
/// window that never reaches the threshold is discarded, never emitted.
#[derive(Debug)]
pub struct BarSeriesBuilder {
    policy: SamplingPolicy,
    window: Accumulator,
}

impl BarSeriesBuilder {
    /// Creates a builder for the given policy.
    #[must_use]
    pub const fn new(policy: SamplingPolicy) -> Self {
        Self {
            policy,
            window: Accumulator::new(),
        }
    }

    /// Returns the sampling policy.
    #[must_use]
    pub const fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// Ingests a record, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this record completes the window,
    /// `None` otherwise.
    pub fn push(&mut self, record: &Record) -> Option<Bar> {
        self.window.ingest(record);
        if self.policy.should_flush(&self.window.snapshot()) {
            self.window.take_bar(self.policy.emits_notional())
        } else {
            None
        }
    }

    /// Returns the in-progress window.
    #[must_use]
    pub const fn pending(&self) -> WindowSnapshot {
        self.window.snapshot()
    }

    /// Finishes sampling, discarding any incomplete window.
    ///
    /// Returns the number of records that contributed to no bar.
    pub fn finish(self) -> usize {
        let dropped = self.window.snapshot().count as usize;
        if dropped > 0 {
            tracing::debug!(
                policy = %self.policy,
                dropped,
                "discarding incomplete trailing window"
            );
        }
        dropped
    }

    /// Samples `records` into bars.
    ///
    /// Records must already be in strictly increasing timestamp order. The
    /// result depends only on the arguments.
    #[must_use]
    pub fn process(records: &[Record], policy: SamplingPolicy) -> BarSequence {
        let bars = match policy {
            SamplingPolicy::Count(n) => Self::process_chunks(records, n.get() as usize),
            SamplingPolicy::Volume(_) | SamplingPolicy::Dollar(_) => {
                let mut builder = Self::new(policy);
                let bars: Vec<Bar> = records
                    .iter()
                    .filter_map(|record| builder.push(record))
                    .collect();
                builder.finish();
                bars
            }
        };
        BarSequence::from_ordered(bars)
    }

    /// Validates field-addressable rows and samples them into bars.
    ///
    /// Every row is converted before any window state exists, so a bad row
    /// fails the call without producing partial output.
    ///
    /// # Errors
    ///
    /// Returns the first schema or type error found, in row order.
    pub fn process_rows<R: FieldAccess>(
        rows: &[R],
        columns: &ColumnNames,
        policy: SamplingPolicy,
    ) -> Result<BarSequence> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| Record::from_fields(row, columns, index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::process(&records, policy))
    }

    /// Fixed-count sampling as a partition into blocks of exactly `size`.
    fn process_chunks(records: &[Record], size: usize) -> Vec<Bar> {
        let chunks = records.chunks_exact(size);
        let dropped = chunks.remainder().len();
        let bars = chunks
            .filter_map(|chunk| {
                let mut window = Accumulator::new();
                chunk.iter().for_each(|record| window.ingest(record));
                window.take_bar(false)
            })
            .collect();
        if dropped > 0 {
            tracing::debug!(size, dropped, "discarding incomplete trailing block");
        }
        bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use serde_json::{Map, Value};
    use tickbars_types::TickbarsError;

    fn ts(second: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + TimeDelta::seconds(second)
    }

    fn ticks(volumes: &[f64]) -> Vec<Record> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &v)| Record::tick(ts(i as i64), 100.0 + i as f64, v))
            .collect()
    }

    #[test]
    fn test_push_emits_on_threshold() {
        let mut builder = BarSeriesBuilder::new(SamplingPolicy::volume(2.0).unwrap());
        let records = ticks(&[1.0, 1.0, 1.0]);

        assert!(builder.push(&records[0]).is_none());
        let bar = builder.push(&records[1]).unwrap();
        assert_eq!(bar.timestamp, ts(1));
        assert_eq!(bar.record_count, 2);

        assert!(builder.push(&records[2]).is_none());
        assert_eq!(builder.pending().count, 1);
        assert_eq!(builder.finish(), 1);
    }

    #[test]
    fn test_volume_example() {
        let records = ticks(&[1.0, 1.0, 1.0, 3.0, 1.0]);
        let bars = BarSeriesBuilder::process(&records, SamplingPolicy::volume(2.0).unwrap());

        assert_eq!(bars.len(), 2);
        let bars = bars.bars();
        assert!((bars[0].volume - 2.0).abs() < 1e-10);
        assert_eq!(bars[0].timestamp, ts(1));
        assert!((bars[1].volume - 4.0).abs() < 1e-10);
        assert!((bars[1].open - 102.0).abs() < 1e-10);
        assert!((bars[1].close - 103.0).abs() < 1e-10);
        assert_eq!(bars[1].timestamp, ts(3));
        assert_eq!(bars[1].notional, None);
    }

    #[test]
    fn test_single_large_record_closes_window() {
        let records = ticks(&[10.0, 0.5, 0.5]);
        let bars = BarSeriesBuilder::process(&records, SamplingPolicy::volume(2.0).unwrap());

        assert_eq!(bars.len(), 1);
        assert_eq!(bars.bars()[0].record_count, 1);
    }

    #[test]
    fn test_dollar_bars_carry_notional() {
        // Close prices 100, 101, 102, 103; unit volume.
        let records = ticks(&[1.0, 1.0, 1.0, 1.0]);
        let bars = BarSeriesBuilder::process(&records, SamplingPolicy::dollar(201.0).unwrap());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars.bars()[0].notional, Some(201.0));
        assert_eq!(bars.bars()[1].notional, Some(205.0));
    }

    #[test]
    fn test_count_drops_remainder() {
        let records = ticks(&[1.0; 7]);
        let bars = BarSeriesBuilder::process(&records, SamplingPolicy::count(3).unwrap());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars.bars()[1].timestamp, ts(5));
        assert!((bars.bars()[1].open - 103.0).abs() < 1e-10);
    }

    #[test]
    fn test_count_keeps_exact_final_block() {
        let records = ticks(&[1.0; 6]);
        let bars = BarSeriesBuilder::process(&records, SamplingPolicy::count(3).unwrap());
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        for policy in [
            SamplingPolicy::count(2).unwrap(),
            SamplingPolicy::volume(1.0).unwrap(),
            SamplingPolicy::default_dollar(),
        ] {
            assert!(BarSeriesBuilder::process(&[], policy).is_empty());
        }
    }

    #[test]
    fn test_process_rows_fails_fast() {
        let rows: Vec<Map<String, Value>> = serde_json::from_str(
            r#"[
                {"datetime": "2024-01-01T00:00:00Z", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 5},
                {"datetime": "2024-01-01T00:00:01Z", "open": 1, "high": 1, "low": 1, "close": 1}
            ]"#,
        )
        .unwrap();

        let err = BarSeriesBuilder::process_rows(
            &rows,
            &ColumnNames::default(),
            SamplingPolicy::volume(1.0).unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, TickbarsError::Schema { row: Some(1), .. }));
    }

    #[test]
    fn test_process_rows() {
        let rows: Vec<Map<String, Value>> = serde_json::from_str(
            r#"[
                {"ts": "2024-01-01 00:00:00", "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 1},
                {"ts": "2024-01-01 00:00:01", "open": 1.5, "high": 3, "low": 1, "close": 2, "volume": 1}
            ]"#,
        )
        .unwrap();

        let bars = BarSeriesBuilder::process_rows(
            &rows,
            &ColumnNames::new().with_time("ts"),
            SamplingPolicy::count(2).unwrap(),
        )
        .unwrap();

        assert_eq!(bars.len(), 1);
        let bar = bars.bars()[0];
        assert!((bar.high - 3.0).abs() < 1e-10);
        assert!((bar.low - 0.5).abs() < 1e-10);
    }
}
