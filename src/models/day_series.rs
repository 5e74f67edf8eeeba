use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub at: NaiveDateTime, // projected onto the reference date
    pub value: f64,
    pub heater_on: bool,
}

/// One calendar day of a single channel, already projected onto the
/// reference date.
#[derive(Debug, Clone, Serialize)]
pub struct DaySeries {
    pub date: NaiveDate,
    pub delta_days: i64,
    pub samples: Vec<Sample>,
}

impl DaySeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn instants(&self) -> Vec<NaiveDateTime> {
        self.samples.iter().map(|s| s.at).collect()
    }
}
