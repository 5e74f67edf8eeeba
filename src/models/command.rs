use super::mode::Mode;
use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Parameter change as the operator typed it, not yet checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandRequest {
    pub mode: i64,
    pub heater_from: f64,
    pub heater_to: f64,
    pub light: i64,
}

/// A validated parameter change for the sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamCommand {
    pub mode: Mode,
    pub heater_from: f64,
    pub heater_to: f64,
    pub light_on: bool,
}

impl CommandRequest {
    /// Check the request against the node's limits.
    ///
    /// `magic` doubles as the frame marker on the wire, so no value may reach it.
    pub fn validate(&self, magic: i64) -> AppResult<ParamCommand> {
        let largest = (self.mode as f64).max(self.heater_from).max(self.heater_to);
        if !largest.is_finite() || largest >= magic as f64 {
            return Err(AppError::InvalidCommand(format!(
                "values must stay below {magic}"
            )));
        }
        if self.heater_from.is_nan() || self.heater_to.is_nan() {
            return Err(AppError::InvalidCommand(
                "heater range must be numeric".to_string(),
            ));
        }

        let mode = Mode::from_code(self.mode)
            .ok_or_else(|| AppError::InvalidCommand(format!("unknown mode {}", self.mode)))?;

        let light_on = match self.light {
            0 => false,
            1 => true,
            other => {
                return Err(AppError::InvalidCommand(format!(
                    "light must be 0 or 1, got {other}"
                )));
            }
        };

        Ok(ParamCommand {
            mode,
            heater_from: self.heater_from,
            heater_to: self.heater_to,
            light_on,
        })
    }
}

impl ParamCommand {
    /// Single-line wire form: `MAGIC mode heaterFrom heaterTo light`.
    pub fn to_line(&self, magic: i64) -> String {
        format!(
            "{} {} {:.1} {:.1} {}",
            magic,
            self.mode.code(),
            self.heater_from,
            self.heater_to,
            u8::from(self.light_on)
        )
    }

    /// Read back a line written by [`ParamCommand::to_line`].
    pub fn from_line(line: &str, magic: i64) -> AppResult<ParamCommand> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let bad = || AppError::InvalidCommand(format!("malformed command line '{line}'"));

        if parts.len() != 5 || parts[0].parse::<i64>().ok() != Some(magic) {
            return Err(bad());
        }

        CommandRequest {
            mode: parts[1].parse().map_err(|_| bad())?,
            heater_from: parts[2].parse().map_err(|_| bad())?,
            heater_to: parts[3].parse().map_err(|_| bad())?,
            light: parts[4].parse().map_err(|_| bad())?,
        }
        .validate(magic)
    }
}
