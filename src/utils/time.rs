//! Time utilities: parsing log timestamps, formatting rows, chart x positions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Format the collector writes timestamps with.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a logged timestamp as naive local time.
///
/// Full dates are accepted in the ISO forms the collector has written over
/// time (an RFC 3339 offset is dropped, the wall clock is kept). A bare time
/// of day is placed on `reference`.
pub fn parse_log_timestamp(s: &str, reference: NaiveDate) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(reference.and_time(t));
        }
    }

    None
}

pub fn format_log_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Whole seconds elapsed since the local midnight of `dt`.
pub fn seconds_since_midnight(dt: &NaiveDateTime) -> i64 {
    dt.time().num_seconds_from_midnight() as i64
}

/// Chart x position: hours since midnight of `reference`.
pub fn hours_since(reference: NaiveDate, dt: &NaiveDateTime) -> f64 {
    let midnight = reference.and_time(NaiveTime::MIN);
    (*dt - midnight).num_milliseconds() as f64 / 3_600_000.0
}
