//! Axis layout: hourly x grid, integer y ticks with a target bin count.

use crate::models::plan::{AxisConfig, DrawInstruction};

const STEP_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// Integer-valued ticks covering `lo..=hi` in at most `nbins` intervals.
/// Returns the ticks and the step between them.
pub fn integer_ticks(lo: f64, hi: f64, nbins: usize) -> (Vec<f64>, f64) {
    let (mut lo, mut hi) = if lo.is_finite() && hi.is_finite() && lo <= hi {
        (lo, hi)
    } else {
        (0.0, 1.0)
    };
    if hi - lo < 1e-9 {
        lo -= 1.0;
        hi += 1.0;
    }

    let nbins = nbins.max(1);
    let raw = (hi - lo) / nbins as f64;
    let mut scale = 10f64.powf(raw.log10().floor()).max(1.0);

    let step = 'search: loop {
        for m in STEP_MULTIPLIERS {
            let step = m * scale;
            let bins = (hi / step).ceil() - (lo / step).floor();
            if bins <= nbins as f64 {
                break 'search step;
            }
        }
        scale *= 10.0;
    };

    let start = (lo / step).floor() * step;
    let count = ((hi / step).ceil() - (lo / step).floor()) as usize;
    let ticks = (0..=count).map(|i| start + i as f64 * step).collect();
    (ticks, step)
}

/// Minor grid split for a major step; only steps above one unit get one.
pub fn minor_subdivisions(step: f64) -> Option<u32> {
    let s = step.round();
    if s > 1.0 { Some(s as u32) } else { None }
}

pub fn build_axis(
    instructions: &[DrawInstruction],
    nbins: usize,
    minor_grid_visible: bool,
) -> AxisConfig {
    let (lo, hi) = instructions
        .iter()
        .flat_map(|i| i.points().iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    let (y_ticks, y_step) = integer_ticks(lo, hi, nbins);

    AxisConfig {
        x_range: (0.0, 24.0),
        x_major_step_hours: 1.0,
        minor_subdivisions: minor_subdivisions(y_step),
        y_ticks,
        y_step,
        minor_grid_visible,
    }
}
