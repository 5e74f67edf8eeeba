use serde::{Deserialize, Serialize};

/// Heater operating mode as the node encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Off,  // 0
    On,   // 1
    Auto, // 2
}

impl Mode {
    pub fn code(&self) -> i64 {
        match self {
            Mode::Off => 0,
            Mode::On => 1,
            Mode::Auto => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Mode::Off),
            1 => Some(Mode::On),
            2 => Some(Mode::Auto),
            _ => None,
        }
    }

    /// Parse the integer code as it appears in log rows.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok().and_then(Self::from_code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::On => "on",
            Mode::Auto => "auto",
        }
    }
}
