#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rcactus::config::Config;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn rca() -> Command {
    cargo_bin_cmd!("rcactus")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(h, m, s).unwrap())
}

/// Fresh, empty working directory inside the system temp dir
pub fn test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rcactus_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).unwrap();
    path
}

/// Config whose files all live in `dir`, no time offset, no open retries
pub fn test_config(dir: &Path) -> Config {
    Config {
        log_file: dir.join("cactuslog.txt").to_string_lossy().to_string(),
        cmd_file: dir.join("cactuscmd.txt").to_string_lossy().to_string(),
        ini_file: dir.join("cactusini.txt").to_string_lossy().to_string(),
        output_dir: dir.join("charts").to_string_lossy().to_string(),
        log_time_offset_sec: 0,
        open_retries: 1,
        open_retry_delay_ms: 0,
        ..Config::default()
    }
}

/// Write `test_config(dir)` to disk and return the config file path
pub fn write_test_config(dir: &Path) -> String {
    let path = dir.join("rcactus.conf");
    test_config(dir).save_to(&path).unwrap();
    path.to_string_lossy().to_string()
}

pub fn write_log(cfg: &Config, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(cfg.log_path(), content).unwrap();
}

/// A 6-field row every `step_min` minutes over the whole day, heater on
/// between 06:00 and 09:00
pub fn day_rows(day: NaiveDate, base: f64, step_min: u32) -> Vec<String> {
    (0..24 * 60)
        .step_by(step_min as usize)
        .map(|minute| {
            let h = minute / 60;
            let m = minute % 60;
            let heater = u8::from((6..9).contains(&h));
            format!(
                "{},{:.2},2,{},5.0,10.0",
                at(day, h, m, 0).format("%Y-%m-%d %H:%M:%S"),
                base + (minute as f64 / 240.0),
                heater
            )
        })
        .collect()
}
