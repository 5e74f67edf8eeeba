use super::mode::Mode;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DEFAULT_MODE: Mode = Mode::Auto;
pub const DEFAULT_HEATER_FROM: f64 = 5.0;
pub const DEFAULT_HEATER_TO: f64 = 10.0;

/// One canonical log row, whatever schema it was written with.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub temperature_primary: f64,
    pub temperature_secondary: Option<f64>, // only 8- and 9-field rows
    pub humidity: f64,                      // NaN until a row carries it
    pub mode: Mode,
    pub heater_on: bool,
    pub heater_from: f64,
    pub heater_to: f64,
    pub light_on: bool,
}

/// Settings carried from one row to the next when a schema omits them.
#[derive(Debug, Clone, Copy)]
pub struct CarriedState {
    pub mode: Mode,
    pub heater_on: bool,
    pub heater_from: f64,
    pub heater_to: f64,
    pub humidity: f64,
    pub light_on: bool,
}

impl Default for CarriedState {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE,
            heater_on: false,
            heater_from: DEFAULT_HEATER_FROM,
            heater_to: DEFAULT_HEATER_TO,
            humidity: f64::NAN,
            light_on: false,
        }
    }
}

/// Which sensor curve a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Temperature,
    Humidity,
}

impl Channel {
    /// Sample value and heater flag for this channel, if the record has one.
    pub fn sample(&self, record: &LogRecord) -> Option<(f64, bool)> {
        match self {
            Channel::Temperature => Some((record.temperature_primary, record.heater_on)),
            Channel::Humidity if record.humidity.is_nan() => None,
            Channel::Humidity => Some((record.humidity, false)),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature, °C",
            Channel::Humidity => "Humidity, %",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
        }
    }
}
