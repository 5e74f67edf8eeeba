//! Collector side: turns node status lines into log rows and forwards
//! operator commands back to the node.

use crate::config::Config;
use crate::core::relay::CommandRelay;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::time::format_log_timestamp;
use chrono::{Duration, Local, NaiveDateTime};
use regex::Regex;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const READING_PATTERN: &str = r"(\w+)\s+=\s+([-.\d]+|nan)";

/// One status line from the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeReading {
    pub mode: i64,
    pub temp_lm35: f64,
    pub temp_dht22: f64,
    pub humidity: f64,
    pub heater: i64,
    pub heater_from: f64,
    pub heater_to: f64,
    pub light: i64,
}

/// The settings part of a reading; a change here is always logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub mode: i64,
    pub heater: i64,
    pub heater_from: f64,
    pub heater_to: f64,
    pub light: i64,
}

impl NodeReading {
    fn from_pairs(pairs: &HashMap<&str, &str>) -> AppResult<NodeReading> {
        let raw = |key: &str| {
            pairs
                .get(key)
                .copied()
                .ok_or_else(|| AppError::InvalidReading(format!("missing '{key}'")))
        };
        let float = |key: &str| -> AppResult<f64> {
            let v = raw(key)?;
            v.parse()
                .map_err(|_| AppError::InvalidReading(format!("bad {key} '{v}'")))
        };
        let int = |key: &str| -> AppResult<i64> {
            let v = raw(key)?;
            v.parse()
                .map_err(|_| AppError::InvalidReading(format!("bad {key} '{v}'")))
        };

        Ok(NodeReading {
            mode: int("mode")?,
            temp_lm35: float("tempLM35")?,
            temp_dht22: float("tempDHT22")?,
            humidity: float("humidityDHT22")?,
            heater: int("heater")?,
            heater_from: float("heaterFrom")?,
            heater_to: float("heaterTo")?,
            light: int("light")?,
        })
    }

    pub fn state(&self) -> NodeState {
        NodeState {
            mode: self.mode,
            heater: self.heater,
            heater_from: self.heater_from,
            heater_to: self.heater_to,
            light: self.light,
        }
    }

    /// Current (9-field) log row layout.
    pub fn to_log_row(&self, at: &NaiveDateTime) -> String {
        format!(
            "{},{:.2},{:.2},{:.2},{},{},{:.1},{:.1},{}",
            format_log_timestamp(at),
            self.temp_lm35,
            self.temp_dht22,
            self.humidity,
            self.mode,
            self.heater,
            self.heater_from,
            self.heater_to,
            self.light
        )
    }
}

pub struct Collector {
    pattern: Regex,
    relay: CommandRelay,
    log_file: PathBuf,
    cmd_file: PathBuf,
    ini_file: PathBuf,
    update_period: Duration,
    first_run: bool,
    last_logged: Option<NaiveDateTime>,
    last_state: Option<NodeState>,
}

impl Collector {
    pub fn new(cfg: &Config) -> AppResult<Self> {
        let pattern = Regex::new(READING_PATTERN).map_err(|e| AppError::Other(e.to_string()))?;
        Ok(Self {
            pattern,
            relay: CommandRelay::new(cfg.command_repeat),
            log_file: cfg.log_path(),
            cmd_file: cfg.cmd_path(),
            ini_file: cfg.ini_path(),
            update_period: Duration::seconds(cfg.update_period_sec),
            first_run: true,
            last_logged: None,
            last_state: None,
        })
    }

    /// Parse a node line. Lines without a `mode` entry are chatter and yield `None`.
    pub fn parse_line(&self, line: &str) -> AppResult<Option<NodeReading>> {
        if !line.contains("mode") {
            return Ok(None);
        }
        let pairs: HashMap<&str, &str> = self
            .pattern
            .captures_iter(line)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();
        NodeReading::from_pairs(&pairs).map(Some)
    }

    /// Handle one node line received at `now`.
    ///
    /// Replays the last applied settings on the first reading, forwards any
    /// pending command, and appends a log row when the settings changed or
    /// the update period has passed. Returns the row written, if any.
    pub fn handle_line<W: Write>(
        &mut self,
        line: &str,
        now: NaiveDateTime,
        node: &mut W,
    ) -> AppResult<Option<String>> {
        let Some(reading) = self.parse_line(line)? else {
            return Ok(None);
        };

        if self.first_run {
            if let Err(e) = self.relay.execute(&self.ini_file, node, None) {
                warning(format!("Failed to replay init settings: {e}"));
            }
            self.first_run = false;
        }

        if let Err(e) = self
            .relay
            .execute(&self.cmd_file, node, Some(&self.ini_file))
        {
            warning(format!("Failed to relay pending command: {e}"));
        }

        let timed_out = match self.last_logged {
            None => true,
            Some(mark) => (now - mark).num_seconds() > self.update_period.num_seconds(),
        };
        let state = reading.state();
        if !timed_out && self.last_state == Some(state) {
            return Ok(None);
        }

        let row = reading.to_log_row(&now);
        if let Err(e) = self.append_row(&row) {
            // state is not recorded, so the next reading tries again
            warning(format!("Failed to append to {}: {e}", self.log_file.display()));
            return Ok(None);
        }

        self.last_logged = Some(now);
        self.last_state = Some(state);
        Ok(Some(row))
    }

    fn append_row(&self, row: &str) -> AppResult<()> {
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;
        writeln!(log, "{row}")?;
        Ok(())
    }

    /// Process node lines until `input` ends. Returns the number of rows logged.
    ///
    /// Bytes garbled on the link are decoded lossily; such lines fail to
    /// parse and are skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, node: &mut W) -> AppResult<usize> {
        let mut logged = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end();
            match self.handle_line(line, Local::now().naive_local(), node) {
                Ok(Some(row)) => {
                    info(&row);
                    logged += 1;
                }
                Ok(None) => {}
                Err(AppError::InvalidReading(reason)) => {
                    warning(format!("Skipping node line ({reason}): {line}"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(logged)
    }
}
