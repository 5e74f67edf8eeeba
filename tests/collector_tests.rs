use chrono::Duration;
use rcactus::core::collector::{Collector, NodeReading};
use rcactus::core::normalizer::Normalizer;
use rcactus::errors::AppError;
use rcactus::models::mode::Mode;
use std::fs;
use std::io::Cursor;

mod common;
use common::{at, date, test_config, test_dir};

const LINE: &str = "mode = 2 tempLM35 = 21.50 tempDHT22 = 20.90 humidityDHT22 = 45.00 \
                    heater = 0 heaterFrom = 5.0 heaterTo = 10.0 light = 1";

fn reading() -> NodeReading {
    NodeReading {
        mode: 2,
        temp_lm35: 21.5,
        temp_dht22: 20.9,
        humidity: 45.0,
        heater: 0,
        heater_from: 5.0,
        heater_to: 10.0,
        light: 1,
    }
}

#[test]
fn node_line_is_parsed() {
    let dir = test_dir("collect_parse");
    let collector = Collector::new(&test_config(&dir)).unwrap();

    assert_eq!(collector.parse_line(LINE).unwrap(), Some(reading()));
    assert_eq!(collector.parse_line("DHT22 warming up").unwrap(), None);
}

#[test]
fn missing_or_bad_keys_are_rejected() {
    let dir = test_dir("collect_missing");
    let collector = Collector::new(&test_config(&dir)).unwrap();

    let err = collector
        .parse_line("mode = 2 tempLM35 = 21.50")
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReading(_)));

    let nan = collector
        .parse_line(&LINE.replace("45.00", "nan"))
        .unwrap()
        .unwrap();
    assert!(nan.humidity.is_nan());
}

#[test]
fn log_row_uses_the_nine_field_layout() {
    let row = reading().to_log_row(&at(date(2026, 3, 10), 12, 0, 0));
    assert_eq!(row, "2026-03-10 12:00:00.000000,21.50,20.90,45.00,2,0,5.0,10.0,1");

    let log = Normalizer::new(date(2026, 3, 10), 0).normalize_lines(&[row.as_str()]);
    assert_eq!(log.malformed_count(), 0);
    let r = &log.records[0];
    assert_eq!(r.temperature_primary, 21.5);
    assert_eq!(r.temperature_secondary, Some(20.9));
    assert_eq!(r.humidity, 45.0);
    assert_eq!(r.mode, Mode::Auto);
    assert!(!r.heater_on);
    assert!(r.light_on);
}

#[test]
fn rows_are_logged_on_change_or_after_the_update_period() {
    let dir = test_dir("collect_period");
    let cfg = test_config(&dir);
    let mut collector = Collector::new(&cfg).unwrap();
    let mut node = Vec::new();
    let t0 = at(date(2026, 3, 10), 12, 0, 0);

    assert!(collector.handle_line(LINE, t0, &mut node).unwrap().is_some());
    // same settings, within the period
    let later = t0 + Duration::seconds(300);
    assert!(collector.handle_line(LINE, later, &mut node).unwrap().is_none());
    // heater switched on
    let switched = LINE.replace("heater = 0", "heater = 1");
    assert!(collector.handle_line(&switched, later, &mut node).unwrap().is_some());
    // unchanged again, but the period is over
    let expired = later + Duration::seconds(601);
    assert!(collector.handle_line(&switched, expired, &mut node).unwrap().is_some());
    // chatter is ignored
    assert!(collector.handle_line("boot", expired, &mut node).unwrap().is_none());

    let content = fs::read_to_string(cfg.log_path()).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(node.is_empty());
}

#[test]
fn first_reading_replays_ini_and_pending_command_is_relayed() {
    let dir = test_dir("collect_relay");
    let cfg = test_config(&dir);
    fs::write(cfg.ini_path(), "I").unwrap();
    fs::write(cfg.cmd_path(), "C").unwrap();

    let mut collector = Collector::new(&cfg).unwrap();
    let mut node = Vec::new();
    let t0 = at(date(2026, 3, 10), 12, 0, 0);

    collector.handle_line(LINE, t0, &mut node).unwrap();

    let sent = String::from_utf8(node.clone()).unwrap();
    // each burst ends on its own line so the two never merge
    assert_eq!(
        sent,
        format!("{}\n{}\n", vec!["I"; 10].join(" "), vec!["C"; 10].join(" "))
    );
    assert!(!cfg.cmd_path().exists());
    assert_eq!(fs::read_to_string(cfg.ini_path()).unwrap(), "C");

    // the ini file is only replayed once
    node.clear();
    collector
        .handle_line(LINE, t0 + Duration::seconds(1), &mut node)
        .unwrap();
    assert!(node.is_empty());
}

#[test]
fn run_counts_rows_and_skips_bad_lines() {
    let dir = test_dir("collect_run");
    let cfg = test_config(&dir);
    let mut collector = Collector::new(&cfg).unwrap();

    let input = format!("hello\nmode = 1 broken\n{LINE}\n{LINE}\n");
    let mut node = Vec::new();
    let logged = collector.run(Cursor::new(input), &mut node).unwrap();

    assert_eq!(logged, 1);
    assert_eq!(fs::read_to_string(cfg.log_path()).unwrap().lines().count(), 1);
}

#[test]
fn garbled_bytes_do_not_stop_collection() {
    let dir = test_dir("collect_garbled");
    let cfg = test_config(&dir);
    let mut collector = Collector::new(&cfg).unwrap();

    let switched = LINE.replace("heater = 0", "heater = 1");
    let mut input = Vec::new();
    input.extend_from_slice(LINE.as_bytes());
    input.extend_from_slice(b"\n\xff\xfe garbage\nmode = \xff2\n");
    input.extend_from_slice(switched.as_bytes());
    input.push(b'\n');

    let mut node = Vec::new();
    let logged = collector.run(Cursor::new(input), &mut node).unwrap();

    assert_eq!(logged, 2);
    assert_eq!(fs::read_to_string(cfg.log_path()).unwrap().lines().count(), 2);
}

#[test]
fn failed_log_append_is_retried_on_next_reading() {
    let dir = test_dir("collect_append");
    let mut cfg = test_config(&dir);
    let log_dir = dir.join("later");
    cfg.log_file = log_dir.join("cactuslog.txt").to_string_lossy().to_string();

    let mut collector = Collector::new(&cfg).unwrap();
    let mut node = Vec::new();
    let t0 = at(date(2026, 3, 10), 12, 0, 0);

    // parent directory missing: warned, nothing logged, no error
    assert!(collector.handle_line(LINE, t0, &mut node).unwrap().is_none());

    fs::create_dir_all(&log_dir).unwrap();
    let row = collector
        .handle_line(LINE, t0 + Duration::seconds(5), &mut node)
        .unwrap();
    assert!(row.is_some());
    assert_eq!(fs::read_to_string(cfg.log_path()).unwrap().lines().count(), 1);
}
