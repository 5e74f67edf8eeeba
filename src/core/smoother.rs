//! Heater-aware moving average smoothing.
//!
//! Switching the heater produces a real step in the temperature curve, so a
//! day is smoothed per run of constant heater state and the step survives.

use crate::models::day_series::{DaySeries, Sample};
use chrono::NaiveDateTime;
use std::ops::Range;

/// Passes applied to days that only feed the historical band.
pub const WHOLE_DAY_PASSES: usize = 3;

/// A maximal run of equal heater state, as a range into the day's samples.
///
/// The range reaches one sample into the next run (when there is one) so the
/// drawn segments join up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub heater_on: bool,
    pub range: Range<usize>,
}

#[derive(Debug, Clone)]
pub struct SmoothedSegment {
    pub heater_on: bool,
    pub instants: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

pub fn split_segments(samples: &[Sample]) -> Vec<Segment> {
    let n = samples.len();
    let mut segments = Vec::new();
    let mut start = 0;

    while start < n {
        let heater_on = samples[start].heater_on;
        let run = samples[start..]
            .iter()
            .take_while(|s| s.heater_on == heater_on)
            .count();
        let finish = start + run;

        segments.push(Segment {
            heater_on,
            range: start..(finish + 1).min(n),
        });
        start = finish;
    }

    segments
}

/// Half-width actually used for a segment of `len` samples.
///
/// Short heater-off stretches get half their length so brief dips are not
/// flattened away; heater-on stretches always ask for the full window.
pub fn effective_window(len: usize, heater_on: bool, window: usize) -> usize {
    if !heater_on && len < window {
        len / 2
    } else {
        window
    }
}

/// Centered moving average over `2 * half_width + 1` samples.
///
/// Both ends are padded by point-reflecting the `half_width` neighbouring
/// samples through the edge value, and the padding is cut off again, so the
/// output has the input's length. The half-width is clamped to `len - 2`;
/// when nothing is left the input is returned as is.
pub fn moving_average(values: &[f64], half_width: usize) -> Vec<f64> {
    let n = values.len();
    let w = half_width.min(n.saturating_sub(2));
    if w == 0 {
        return values.to_vec();
    }

    let first = values[0];
    let last = values[n - 1];

    let mut padded = Vec::with_capacity(n + 2 * w);
    padded.extend(values[1..=w].iter().rev().map(|v| 2.0 * first - v));
    padded.extend_from_slice(values);
    padded.extend(values[n - 1 - w..n - 1].iter().rev().map(|v| 2.0 * last - v));

    let k = 2 * w + 1;
    padded
        .windows(k)
        .map(|win| win.iter().sum::<f64>() / k as f64)
        .collect()
}

pub fn smooth_segment(values: &[f64], heater_on: bool, window: usize) -> Vec<f64> {
    moving_average(values, effective_window(values.len(), heater_on, window))
}

/// Smooth every heater segment of `day` on its own.
pub fn smooth_day_segments(day: &DaySeries, window: usize) -> Vec<SmoothedSegment> {
    split_segments(&day.samples)
        .into_iter()
        .map(|seg| {
            let slice = &day.samples[seg.range];
            let values: Vec<f64> = slice.iter().map(|s| s.value).collect();
            SmoothedSegment {
                heater_on: seg.heater_on,
                instants: slice.iter().map(|s| s.at).collect(),
                values: smooth_segment(&values, seg.heater_on, window),
            }
        })
        .collect()
}

/// Heavier smoothing for background days: whole day, no segmentation.
pub fn smooth_whole_day(values: &[f64], window: usize, passes: usize) -> Vec<f64> {
    let mut out = values.to_vec();
    for _ in 0..passes {
        out = moving_average(&out, window);
    }
    out
}
