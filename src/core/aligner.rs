//! Groups records into calendar days and overlays them on one reference day.

use crate::models::day_series::{DaySeries, Sample};
use crate::models::record::{Channel, LogRecord};
use crate::utils::time::{SECONDS_PER_DAY, seconds_since_midnight};
use chrono::{Duration, NaiveDate, NaiveTime};

/// Samples this close to a midnight are treated as sitting on it.
pub const MIDNIGHT_SNAP_SECS: i64 = 11 * 60;

pub struct DayAligner {
    pub reference: NaiveDate,
    /// Days at least this old are left out.
    pub horizon_days: i64,
}

impl DayAligner {
    pub fn new(reference: NaiveDate, horizon_days: i64) -> Self {
        Self {
            reference,
            horizon_days,
        }
    }

    /// Split `records` into per-day series for `channel`.
    ///
    /// Consecutive records sharing a date form one day, in log order. Days
    /// outside `0..horizon_days` days before the reference are skipped.
    pub fn align(&self, records: &[LogRecord], channel: Channel) -> Vec<DaySeries> {
        let mut days: Vec<DaySeries> = Vec::new();

        for record in records {
            let Some((value, heater_on)) = channel.sample(record) else {
                continue;
            };
            let date = record.timestamp.date();
            let delta_days = (self.reference - date).num_days();
            if !(0..self.horizon_days).contains(&delta_days) {
                continue;
            }

            let sample = Sample {
                at: self.reference.and_time(record.timestamp.time()),
                value,
                heater_on,
            };

            match days.last_mut() {
                Some(day) if day.date == date => day.samples.push(sample),
                _ => days.push(DaySeries {
                    date,
                    delta_days,
                    samples: vec![sample],
                }),
            }
        }

        for day in &mut days {
            fix_time(self.reference, &mut day.samples);
        }

        days
    }
}

/// Pull the first sample back to midnight and push the last one forward to
/// the next midnight when each lies within [`MIDNIGHT_SNAP_SECS`] of it.
pub fn fix_time(reference: NaiveDate, samples: &mut [Sample]) {
    let midnight = reference.and_time(NaiveTime::MIN);

    if let Some(first) = samples.first_mut()
        && first.at.date() == reference
        && seconds_since_midnight(&first.at) <= MIDNIGHT_SNAP_SECS
    {
        first.at = midnight;
    }

    if samples.len() < 2 {
        return;
    }

    if let Some(last) = samples.last_mut()
        && last.at.date() == reference
        && last.at != midnight
        && SECONDS_PER_DAY - seconds_since_midnight(&last.at) <= MIDNIGHT_SNAP_SECS
    {
        last.at = midnight + Duration::days(1);
    }
}
