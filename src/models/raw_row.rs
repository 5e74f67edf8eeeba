//! Log row shapes.
//!
//! The log never carried a version marker: every schema the collector has
//! written is identified by its field count alone.

use super::mode::Mode;
use crate::utils::time::parse_log_timestamp;
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaterSettings {
    pub mode: Mode,
    pub heater_on: bool,
    pub heater_from: f64,
    pub heater_to: f64,
}

/// The five row layouts, keyed by field count.
#[derive(Debug, Clone, PartialEq)]
pub enum RowShape {
    /// `time,temp,heater`
    Heater { heater_on: bool },
    /// `time,temp,mode,heater,heaterFrom,heaterTo`
    Settings(HeaterSettings),
    /// `time,temp,humidity,mode,heater,heaterFrom,heaterTo`
    Humidity {
        humidity: f64,
        settings: HeaterSettings,
    },
    /// `time,temp,temp2,humidity,mode,heater,heaterFrom,heaterTo`
    Secondary {
        temperature_secondary: f64,
        humidity: f64,
        settings: HeaterSettings,
    },
    /// `time,temp,temp2,humidity,mode,heater,heaterFrom,heaterTo,light`
    Light {
        temperature_secondary: f64,
        humidity: f64,
        settings: HeaterSettings,
        light_on: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub shape: RowShape,
}

/// A line that matches none of the known layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedRow {
    pub fields: usize,
    pub reason: String,
}

pub const KNOWN_FIELD_COUNTS: [usize; 5] = [3, 6, 7, 8, 9];

impl RawRow {
    /// Dispatch on field count and parse every field of that layout.
    /// Bare times of day are placed on `reference`.
    pub fn parse(fields: &[&str], reference: NaiveDate) -> Result<RawRow, UnrecognizedRow> {
        let n = fields.len();
        let fail = |reason: String| UnrecognizedRow { fields: n, reason };

        if !KNOWN_FIELD_COUNTS.contains(&n) {
            return Err(fail(format!("unknown field count {n}")));
        }

        let timestamp = parse_log_timestamp(fields[0], reference)
            .ok_or_else(|| fail(format!("bad timestamp '{}'", fields[0])))?;
        let temperature = number(fields[1], "temperature").map_err(fail)?;

        let shape = match n {
            3 => RowShape::Heater {
                heater_on: flag(fields[2], "heater").map_err(fail)?,
            },
            6 => RowShape::Settings(settings(&fields[2..6]).map_err(fail)?),
            7 => RowShape::Humidity {
                humidity: number(fields[2], "humidity").map_err(fail)?,
                settings: settings(&fields[3..7]).map_err(fail)?,
            },
            8 => RowShape::Secondary {
                temperature_secondary: number(fields[2], "secondary temperature").map_err(fail)?,
                humidity: number(fields[3], "humidity").map_err(fail)?,
                settings: settings(&fields[4..8]).map_err(fail)?,
            },
            _ => RowShape::Light {
                temperature_secondary: number(fields[2], "secondary temperature").map_err(fail)?,
                humidity: number(fields[3], "humidity").map_err(fail)?,
                settings: settings(&fields[4..8]).map_err(fail)?,
                light_on: flag(fields[8], "light").map_err(fail)?,
            },
        };

        Ok(RawRow {
            timestamp,
            temperature,
            shape,
        })
    }
}

fn number(s: &str, what: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("bad {what} '{s}'"))
}

fn flag(s: &str, what: &str) -> Result<bool, String> {
    s.trim()
        .parse::<i64>()
        .map(|v| v != 0)
        .map_err(|_| format!("bad {what} flag '{s}'"))
}

/// `mode,heater,heaterFrom,heaterTo`
fn settings(fields: &[&str]) -> Result<HeaterSettings, String> {
    Ok(HeaterSettings {
        mode: Mode::parse(fields[0]).ok_or_else(|| format!("bad mode '{}'", fields[0]))?,
        heater_on: flag(fields[1], "heater")?,
        heater_from: number(fields[2], "heater from")?,
        heater_to: number(fields[3], "heater to")?,
    })
}
