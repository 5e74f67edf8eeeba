use super::record::Channel;
use chrono::NaiveDate;
use serde::Serialize;

/// Normalized RGB, each component in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Blue curve fading to white as `alpha` drops.
    pub fn temperature(alpha: f64) -> Self {
        Rgb {
            r: 1.0 - alpha,
            g: 1.0 - alpha,
            b: 1.0,
        }
    }

    /// Red curve for heater-on segments.
    pub fn heater(alpha: f64) -> Self {
        Rgb {
            r: 1.0,
            g: 1.0 - alpha,
            b: 1.0 - alpha,
        }
    }

    /// Black at full alpha, fading to white.
    pub fn grey(alpha: f64) -> Self {
        Rgb {
            r: 1.0 - alpha,
            g: 1.0 - alpha,
            b: 1.0 - alpha,
        }
    }

    pub fn to_u8(&self) -> (u8, u8, u8) {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    /// Band between the oldest historical curve and a later one.
    Fill {
        outer: NaiveDate,
        inner: NaiveDate,
        color: Rgb,
        points: Vec<(f64, f64)>,
    },
    /// One smoothed segment of a recent day.
    Line {
        date: NaiveDate,
        delta_days: i64,
        heater_on: bool,
        color: Rgb,
        width: u32,
        points: Vec<(f64, f64)>,
    },
}

impl DrawInstruction {
    pub fn points(&self) -> &[(f64, f64)] {
        match self {
            DrawInstruction::Fill { points, .. } | DrawInstruction::Line { points, .. } => points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    /// Hours since midnight of the reference date.
    pub x_range: (f64, f64),
    pub x_major_step_hours: f64,
    pub y_ticks: Vec<f64>,
    pub y_step: f64,
    /// Parts each major y interval is split into, when the step exceeds one unit.
    pub minor_subdivisions: Option<u32>,
    pub minor_grid_visible: bool,
}

impl AxisConfig {
    pub fn y_range(&self) -> (f64, f64) {
        match (self.y_ticks.first(), self.y_ticks.last()) {
            (Some(lo), Some(hi)) if hi > lo => (*lo, *hi),
            _ => (0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPlan {
    pub channel: Channel,
    pub title: String,
    pub reference: NaiveDate,
    pub width: u32,
    pub height: u32,
    pub instructions: Vec<DrawInstruction>,
    pub axis: AxisConfig,
}

impl ChartPlan {
    pub fn lines(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Line { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Fill { .. }))
    }
}
