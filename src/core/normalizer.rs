//! Turns raw log lines of any schema into canonical [`LogRecord`]s.

use crate::models::raw_row::{HeaterSettings, RawRow, RowShape};
use crate::models::record::{CarriedState, LogRecord};
use chrono::{Duration, NaiveDate};
use csv::{ReaderBuilder, Trim};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedLog {
    pub records: Vec<LogRecord>,
    pub malformed: Vec<MalformedLine>,
}

impl NormalizedLog {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }

    pub fn last(&self) -> Option<&LogRecord> {
        self.records.last()
    }
}

pub struct Normalizer {
    /// Date bare times of day are placed on.
    pub reference: NaiveDate,
    /// Shift between the collector clock and local time.
    pub offset: Duration,
}

impl Normalizer {
    pub fn new(reference: NaiveDate, offset_sec: i64) -> Self {
        Self {
            reference,
            offset: Duration::seconds(offset_sec),
        }
    }

    /// Parse the whole log in order. Rows are never reordered; unrecognized
    /// rows are dropped and recorded in [`NormalizedLog::malformed`].
    pub fn normalize(&self, bytes: &[u8]) -> NormalizedLog {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(bytes);

        let mut out = NormalizedLog::default();
        let mut state = CarriedState::default();

        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    out.malformed.push(MalformedLine {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<&str> = record.iter().collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }

            match RawRow::parse(&fields, self.reference) {
                Ok(row) => out.records.push(self.apply(row, &mut state)),
                Err(bad) => out.malformed.push(MalformedLine {
                    line,
                    reason: bad.reason,
                }),
            }
        }

        out
    }

    pub fn normalize_lines(&self, lines: &[&str]) -> NormalizedLog {
        self.normalize(lines.join("\n").as_bytes())
    }

    fn apply(&self, row: RawRow, state: &mut CarriedState) -> LogRecord {
        let mut secondary = None;

        match &row.shape {
            RowShape::Heater { heater_on } => state.heater_on = *heater_on,
            RowShape::Settings(s) => take_settings(s, state),
            RowShape::Humidity { humidity, settings } => {
                state.humidity = *humidity;
                take_settings(settings, state);
            }
            RowShape::Secondary {
                temperature_secondary,
                humidity,
                settings,
            } => {
                secondary = Some(*temperature_secondary);
                state.humidity = *humidity;
                take_settings(settings, state);
            }
            RowShape::Light {
                temperature_secondary,
                humidity,
                settings,
                light_on,
            } => {
                secondary = Some(*temperature_secondary);
                state.humidity = *humidity;
                state.light_on = *light_on;
                take_settings(settings, state);
            }
        }

        LogRecord {
            timestamp: row.timestamp + self.offset,
            temperature_primary: row.temperature,
            temperature_secondary: secondary,
            humidity: state.humidity,
            mode: state.mode,
            heater_on: state.heater_on,
            heater_from: state.heater_from,
            heater_to: state.heater_to,
            light_on: state.light_on,
        }
    }
}

fn take_settings(s: &HeaterSettings, state: &mut CarriedState) {
    state.mode = s.mode;
    state.heater_on = s.heater_on;
    state.heater_from = s.heater_from;
    state.heater_to = s.heater_to;
}
