//! Builds the draw list for one channel: recent days as fading lines, older
//! days folded into a shaded band.

use crate::config::Config;
use crate::core::axis::build_axis;
use crate::core::smoother::{WHOLE_DAY_PASSES, smooth_day_segments, smooth_whole_day};
use crate::models::day_series::DaySeries;
use crate::models::plan::{ChartPlan, DrawInstruction, Rgb};
use crate::models::record::Channel;
use crate::utils::time::hours_since;
use chrono::{NaiveDate, NaiveDateTime};

pub const LINE_WIDTH: u32 = 2;

/// Per-chart presentation settings.
#[derive(Debug, Clone, Copy)]
pub struct ChannelStyle {
    pub channel: Channel,
    pub height: u32,
    pub nbins: usize,
    pub minor_grid: bool,
    pub grey: bool,
}

impl ChannelStyle {
    pub fn temperature(height: u32) -> Self {
        Self {
            channel: Channel::Temperature,
            height,
            nbins: 11,
            minor_grid: true,
            grey: false,
        }
    }

    pub fn humidity(height: u32) -> Self {
        Self {
            channel: Channel::Humidity,
            height,
            nbins: 5,
            minor_grid: false,
            grey: true,
        }
    }
}

/// A background day reduced to one heavily smoothed curve.
#[derive(Debug, Clone)]
pub struct HistoricalCurve {
    pub date: NaiveDate,
    pub points: Vec<(f64, f64)>,
}

/// Oldest historical curve paired with a later one.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub outer: HistoricalCurve,
    pub inner: HistoricalCurve,
}

impl Envelope {
    /// Outer curve forward, inner curve backward.
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        self.outer
            .points
            .iter()
            .chain(self.inner.points.iter().rev())
            .copied()
            .collect()
    }
}

/// Pair the oldest curve with every later one. Needs at least two curves;
/// the oldest is consumed as the shared outer edge.
pub fn envelopes(mut stats: Vec<HistoricalCurve>) -> Vec<Envelope> {
    if stats.len() < 2 {
        return Vec::new();
    }
    let outer = stats.remove(0);
    stats
        .into_iter()
        .map(|inner| Envelope {
            outer: outer.clone(),
            inner,
        })
        .collect()
}

pub struct Compositor {
    pub reference: NaiveDate,
    pub horizon_days: i64,
    pub smooth_window: usize,
    /// Opacity per recency level, newest first. Its length is the number of
    /// days drawn as lines.
    pub curve_alpha: Vec<f64>,
    pub width: u32,
}

impl Compositor {
    pub fn from_config(cfg: &Config, reference: NaiveDate, smooth: Option<usize>) -> Self {
        Self {
            reference,
            horizon_days: cfg.stats_days,
            smooth_window: smooth.unwrap_or(cfg.smooth_window),
            curve_alpha: cfg.curve_alpha.clone(),
            width: cfg.chart_width,
        }
    }

    fn alpha(&self, delta_days: i64) -> f64 {
        let last = self.curve_alpha.len().saturating_sub(1);
        let idx = (delta_days.max(0) as usize).min(last);
        self.curve_alpha.get(idx).copied().unwrap_or(1.0)
    }

    fn points(&self, instants: &[NaiveDateTime], values: &[f64]) -> Vec<(f64, f64)> {
        instants
            .iter()
            .zip(values)
            .map(|(at, v)| (hours_since(self.reference, at), *v))
            .collect()
    }

    /// Draw instructions for `days`: band fills first, then lines from the
    /// oldest recent day to today.
    pub fn compose(&self, days: &[DaySeries], grey: bool) -> Vec<DrawInstruction> {
        let levels = self.curve_alpha.len();
        let tint = |alpha: f64| {
            if grey {
                Rgb::grey(alpha)
            } else {
                Rgb::temperature(alpha)
            }
        };

        let mut ordered: Vec<&DaySeries> = days.iter().collect();
        ordered.sort_by_key(|d| d.date);

        let mut lines = Vec::new();
        let mut stats = Vec::new();

        for day in ordered {
            if !(0..self.horizon_days).contains(&day.delta_days) || day.len() < 2 {
                continue;
            }

            let alpha = self.alpha(day.delta_days);

            if (day.delta_days as usize) < levels {
                for seg in smooth_day_segments(day, self.smooth_window) {
                    let color = if seg.heater_on {
                        Rgb::heater(alpha)
                    } else {
                        tint(alpha)
                    };
                    lines.push(DrawInstruction::Line {
                        date: day.date,
                        delta_days: day.delta_days,
                        heater_on: seg.heater_on,
                        color,
                        width: LINE_WIDTH,
                        points: self.points(&seg.instants, &seg.values),
                    });
                }
            } else {
                let values =
                    smooth_whole_day(&day.values(), self.smooth_window, WHOLE_DAY_PASSES);
                stats.push(HistoricalCurve {
                    date: day.date,
                    points: self.points(&day.instants(), &values),
                });
            }
        }

        let band_color = tint(self.alpha(levels as i64 - 1));
        let mut instructions: Vec<DrawInstruction> = envelopes(stats)
            .into_iter()
            .map(|env| DrawInstruction::Fill {
                outer: env.outer.date,
                inner: env.inner.date,
                color: band_color,
                points: env.polygon(),
            })
            .collect();
        instructions.extend(lines);
        instructions
    }

    pub fn plan(&self, days: &[DaySeries], style: ChannelStyle) -> ChartPlan {
        let instructions = self.compose(days, style.grey);
        let axis = build_axis(&instructions, style.nbins, style.minor_grid);
        ChartPlan {
            channel: style.channel,
            title: style.channel.title().to_string(),
            reference: self.reference,
            width: self.width,
            height: style.height,
            instructions,
            axis,
        }
    }
}
