use chrono::Duration;
use rcactus::core::aligner::{DayAligner, fix_time};
use rcactus::core::normalizer::Normalizer;
use rcactus::models::day_series::Sample;
use rcactus::models::record::{Channel, LogRecord};

mod common;
use common::{at, date};

fn records(lines: &[&str]) -> Vec<LogRecord> {
    Normalizer::new(date(2026, 3, 10), 0)
        .normalize_lines(lines)
        .records
}

fn sample(h: u32, m: u32, s: u32) -> Sample {
    Sample {
        at: at(date(2026, 3, 10), h, m, s),
        value: 20.0,
        heater_on: false,
    }
}

#[test]
fn days_are_projected_onto_the_reference_date() {
    let recs = records(&[
        "2026-03-08 10:00:00,18.0,0",
        "2026-03-08 11:00:00,18.5,0",
        "2026-03-09 10:00:00,19.0,1",
        "2026-03-09 11:00:00,19.5,1",
        "2026-03-10 10:30:00,20.0,0",
        "2026-03-10 11:30:00,20.5,0",
    ]);

    let days = DayAligner::new(date(2026, 3, 10), 7).align(&recs, Channel::Temperature);

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, date(2026, 3, 8));
    assert_eq!(days[0].delta_days, 2);
    assert_eq!(days[1].delta_days, 1);
    assert_eq!(days[2].delta_days, 0);

    let reference = date(2026, 3, 10);
    assert_eq!(days[0].samples[0].at, at(reference, 10, 0, 0));
    assert_eq!(days[1].samples[1].at, at(reference, 11, 0, 0));
    assert_eq!(days[2].samples[0].at, at(reference, 10, 30, 0));
    assert!(days[1].samples.iter().all(|s| s.heater_on));
    assert_eq!(days[1].values(), vec![19.0, 19.5]);
}

#[test]
fn retention_horizon_and_future_days_are_excluded() {
    let recs = records(&[
        "2026-03-03 10:00:00,10.0,0",
        "2026-03-04 10:00:00,11.0,0",
        "2026-03-10 10:00:00,12.0,0",
        "2026-03-11 10:00:00,13.0,0",
    ]);

    let days = DayAligner::new(date(2026, 3, 10), 7).align(&recs, Channel::Temperature);

    let dates: Vec<_> = days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2026, 3, 4), date(2026, 3, 10)]);
    assert_eq!(days[0].delta_days, 6);
}

#[test]
fn humidity_channel_skips_missing_values() {
    let recs = records(&[
        "2026-03-10 08:00:00,20.0,1",
        "2026-03-10 08:10:00,20.0,45.0,2,1,5.0,10.0",
        "2026-03-10 08:20:00,20.0,47.0,2,1,5.0,10.0",
    ]);

    let days = DayAligner::new(date(2026, 3, 10), 7).align(&recs, Channel::Humidity);

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].values(), vec![45.0, 47.0]);
    // humidity curves never take the heater tint
    assert!(days[0].samples.iter().all(|s| !s.heater_on));
}

#[test]
fn samples_near_midnight_snap_to_it() {
    let reference = date(2026, 3, 10);
    let mut samples = vec![sample(0, 5, 30), sample(12, 0, 0), sample(23, 55, 0)];

    fix_time(reference, &mut samples);

    assert_eq!(samples[0].at, at(reference, 0, 0, 0));
    assert_eq!(samples[1].at, at(reference, 12, 0, 0));
    assert_eq!(samples[2].at, at(reference, 0, 0, 0) + Duration::days(1));
}

#[test]
fn snapping_stays_within_eleven_minutes() {
    let reference = date(2026, 3, 10);

    let mut inside = vec![sample(0, 11, 0), sample(23, 49, 0)];
    fix_time(reference, &mut inside);
    assert_eq!(inside[0].at, at(reference, 0, 0, 0));
    assert_eq!(inside[1].at, at(reference, 0, 0, 0) + Duration::days(1));

    let mut outside = vec![sample(0, 11, 1), sample(23, 48, 59)];
    fix_time(reference, &mut outside);
    assert_eq!(outside[0].at, at(reference, 0, 11, 1));
    assert_eq!(outside[1].at, at(reference, 23, 48, 59));
}

#[test]
fn aligner_applies_midnight_correction() {
    let recs = records(&[
        "2026-03-09 00:03:00,18.0,0",
        "2026-03-09 12:00:00,18.5,0",
        "2026-03-09 23:58:00,18.0,0",
    ]);

    let reference = date(2026, 3, 10);
    let days = DayAligner::new(reference, 7).align(&recs, Channel::Temperature);

    let instants = days[0].instants();
    assert_eq!(instants[0], at(reference, 0, 0, 0));
    assert_eq!(instants[2], at(reference, 0, 0, 0) + Duration::days(1));
}
