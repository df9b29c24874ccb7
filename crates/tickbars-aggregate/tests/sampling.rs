//! Behavioural properties of count, volume and dollar sampling.

use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tickbars_aggregate::{BarSeriesBuilder, SamplingPolicy};
use tickbars_types::Record;

fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap() + TimeDelta::seconds(i as i64)
}

/// Candles with deterministic but irregular prices and volumes.
fn candles(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let open = 100.0 + (x * 0.7).sin() * 5.0;
            let close = 100.0 + (x * 0.7 + 0.3).sin() * 5.0;
            let high = open.max(close) + 0.25 + (x * 1.3).cos().abs();
            let low = open.min(close) - 0.25 - (x * 0.9).sin().abs();
            let volume = 1.0 + ((i * 37) % 11) as f64;
            Record::new(ts(i), open, high, low, close, volume)
        })
        .collect()
}

fn unit_ticks(n: usize) -> Vec<Record> {
    (0..n).map(|i| Record::tick(ts(i), 50.0, 1.0)).collect()
}

/// Splits `records` into the windows behind `bars`, using bar timestamps.
fn windows<'a>(records: &'a [Record], ends: &[DateTime<Utc>]) -> Vec<&'a [Record]> {
    let mut start = 0;
    ends.iter()
        .map(|end| {
            let stop = records.iter().position(|r| r.timestamp == *end).unwrap() + 1;
            let window = &records[start..stop];
            start = stop;
            window
        })
        .collect()
}

#[test]
fn count_bars_partition_into_fixed_blocks() {
    let records = candles(23);
    let n = 5;
    let bars = BarSeriesBuilder::process(&records, SamplingPolicy::count(n as u32).unwrap());

    assert_eq!(bars.len(), 23 / n);
    for (k, bar) in bars.bars().iter().enumerate() {
        let block = &records[k * n..(k + 1) * n];
        assert_relative_eq!(bar.open, block[0].open);
        assert_relative_eq!(bar.close, block[n - 1].close);
        assert_relative_eq!(
            bar.high,
            block.iter().map(|r| r.high).fold(f64::NEG_INFINITY, f64::max)
        );
        assert_relative_eq!(
            bar.low,
            block.iter().map(|r| r.low).fold(f64::INFINITY, f64::min)
        );
        assert_relative_eq!(bar.volume, block.iter().map(|r| r.volume).sum::<f64>());
        assert_eq!(bar.timestamp, block[n - 1].timestamp);
        assert_eq!(bar.record_count, n as u64);
        assert_eq!(bar.notional, None);
    }
}

#[test]
fn count_slicing_matches_streaming() {
    let records = candles(41);
    let policy = SamplingPolicy::count(4).unwrap();

    let sliced = BarSeriesBuilder::process(&records, policy);

    let mut builder = BarSeriesBuilder::new(policy);
    let streamed: Vec<_> = records.iter().filter_map(|r| builder.push(r)).collect();
    assert_eq!(builder.finish(), 1);

    assert_eq!(sliced.bars(), streamed.as_slice());
}

#[test]
fn volume_bars_close_greedily() {
    let records = candles(200);
    let threshold = 17.0;
    let bars = BarSeriesBuilder::process(&records, SamplingPolicy::volume(threshold).unwrap());
    assert!(!bars.is_empty());

    let ends: Vec<_> = bars.iter().map(|(ts, _)| ts).collect();
    for (bar, window) in bars.bars().iter().zip(windows(&records, &ends)) {
        let total: f64 = window.iter().map(|r| r.volume).sum();
        let before_last: f64 = window[..window.len() - 1].iter().map(|r| r.volume).sum();

        assert_relative_eq!(bar.volume, total);
        assert!(total >= threshold);
        assert!(before_last < threshold);
        assert_relative_eq!(bar.open, window[0].open);
    }
}

#[test]
fn dollar_bars_close_greedily_on_notional() {
    let records = candles(200);
    let threshold = 2_500.0;
    let bars = BarSeriesBuilder::process(&records, SamplingPolicy::dollar(threshold).unwrap());
    assert!(!bars.is_empty());

    let ends: Vec<_> = bars.iter().map(|(ts, _)| ts).collect();
    for (bar, window) in bars.bars().iter().zip(windows(&records, &ends)) {
        let total: f64 = window.iter().map(Record::notional).sum();
        let before_last: f64 = window[..window.len() - 1].iter().map(Record::notional).sum();

        assert_relative_eq!(bar.notional.unwrap(), total, max_relative = 1e-12);
        assert!(total >= threshold);
        assert!(before_last < threshold);
    }
}

#[test]
fn trailing_window_is_discarded() {
    let records = unit_ticks(5);
    let policy = SamplingPolicy::volume(2.0).unwrap();

    let bars = BarSeriesBuilder::process(&records, policy);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars.last().unwrap().timestamp, records[3].timestamp);

    let mut builder = BarSeriesBuilder::new(policy);
    records.iter().for_each(|r| {
        builder.push(r);
    });
    assert_eq!(builder.finish(), 1);
}

#[test]
fn volume_example_from_mixed_sizes() {
    let volumes = [1.0, 1.0, 1.0, 3.0, 1.0];
    let records: Vec<_> = volumes
        .iter()
        .enumerate()
        .map(|(i, &v)| Record::tick(ts(i), 10.0, v))
        .collect();

    let bars = BarSeriesBuilder::process(&records, SamplingPolicy::volume(2.0).unwrap());

    assert_eq!(bars.len(), 2);
    assert_relative_eq!(bars.bars()[0].volume, 2.0);
    assert_relative_eq!(bars.bars()[1].volume, 4.0);
    assert_eq!(bars.bars()[1].timestamp, records[3].timestamp);
}

#[test]
fn processing_is_deterministic() {
    let records = candles(150);
    for policy in [
        SamplingPolicy::count(7).unwrap(),
        SamplingPolicy::volume(23.5).unwrap(),
        SamplingPolicy::dollar(3_000.0).unwrap(),
    ] {
        let first = BarSeriesBuilder::process(&records, policy);
        let second = BarSeriesBuilder::process(&records, policy);
        assert_eq!(first, second);
    }
}

#[test]
fn bars_are_ordered_and_keyed_by_input_timestamps() {
    let records = candles(150);
    for policy in [
        SamplingPolicy::count(3).unwrap(),
        SamplingPolicy::volume(9.0).unwrap(),
        SamplingPolicy::dollar(800.0).unwrap(),
    ] {
        let bars = BarSeriesBuilder::process(&records, policy);
        let stamps: Vec<_> = bars.iter().map(|(ts, _)| ts).collect();

        assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(stamps.iter().all(|ts| records.iter().any(|r| r.timestamp == *ts)));

        let used: u64 = bars.bars().iter().map(|b| b.record_count).sum();
        assert!(used as usize <= records.len());
        assert!(bars.bars().iter().all(|b| b.high >= b.low));
    }
}

#[test]
fn count_larger_than_input_emits_nothing() {
    let records = unit_ticks(3);
    let policy = SamplingPolicy::count(5).unwrap();

    assert!(BarSeriesBuilder::process(&records, policy).is_empty());

    let mut builder = BarSeriesBuilder::new(policy);
    assert!(records.iter().all(|r| builder.push(r).is_none()));
    assert_eq!(builder.finish(), 3);
}
