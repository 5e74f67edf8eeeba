use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_cmd_file")]
    pub cmd_file: String,
    #[serde(default = "default_ini_file")]
    pub ini_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_serial_device")]
    pub serial_device: String,

    /// Days older than this are not rendered (they stay in the log).
    #[serde(default = "default_stats_days")]
    pub stats_days: i64,
    /// Half-width of the moving average kernel.
    #[serde(default = "default_smooth_window")]
    pub smooth_window: usize,
    /// Opacity per recency level, newest first.
    #[serde(default = "default_curve_alpha")]
    pub curve_alpha: Vec<f64>,
    #[serde(default = "default_magic")]
    pub magic: i64,
    /// Seconds added to every logged timestamp.
    #[serde(default = "default_log_time_offset_sec")]
    pub log_time_offset_sec: i64,

    #[serde(default = "default_command_repeat")]
    pub command_repeat: usize,
    #[serde(default = "default_update_period_sec")]
    pub update_period_sec: i64,
    #[serde(default = "default_open_retries")]
    pub open_retries: u32,
    #[serde(default = "default_open_retry_delay_ms")]
    pub open_retry_delay_ms: u64,

    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_temperature_height")]
    pub temperature_height: u32,
    #[serde(default = "default_humidity_height")]
    pub humidity_height: u32,
}

fn default_log_file() -> String {
    Config::config_dir()
        .join("cactuslog.txt")
        .to_string_lossy()
        .to_string()
}
fn default_cmd_file() -> String {
    Config::config_dir()
        .join("cactuscmd.txt")
        .to_string_lossy()
        .to_string()
}
fn default_ini_file() -> String {
    Config::config_dir()
        .join("cactusini.txt")
        .to_string_lossy()
        .to_string()
}
fn default_output_dir() -> String {
    Config::config_dir()
        .join("charts")
        .to_string_lossy()
        .to_string()
}
fn default_serial_device() -> String {
    "/dev/ttyACM0".to_string()
}
fn default_stats_days() -> i64 {
    7
}
fn default_smooth_window() -> usize {
    11
}
fn default_curve_alpha() -> Vec<f64> {
    vec![1.0, 0.5, 0.25, 0.1]
}
fn default_magic() -> i64 {
    10101
}
fn default_log_time_offset_sec() -> i64 {
    3600
}
fn default_command_repeat() -> usize {
    10
}
fn default_update_period_sec() -> i64 {
    600
}
fn default_open_retries() -> u32 {
    5
}
fn default_open_retry_delay_ms() -> u64 {
    200
}
fn default_chart_width() -> u32 {
    964
}
fn default_temperature_height() -> u32 {
    350
}
fn default_humidity_height() -> u32 {
    200
}

/// Keys every complete configuration file should carry.
pub const CONFIG_KEYS: [&str; 17] = [
    "log_file",
    "cmd_file",
    "ini_file",
    "output_dir",
    "serial_device",
    "stats_days",
    "smooth_window",
    "curve_alpha",
    "magic",
    "log_time_offset_sec",
    "command_repeat",
    "update_period_sec",
    "open_retries",
    "open_retry_delay_ms",
    "chart_width",
    "temperature_height",
    "humidity_height",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            cmd_file: default_cmd_file(),
            ini_file: default_ini_file(),
            output_dir: default_output_dir(),
            serial_device: default_serial_device(),
            stats_days: default_stats_days(),
            smooth_window: default_smooth_window(),
            curve_alpha: default_curve_alpha(),
            magic: default_magic(),
            log_time_offset_sec: default_log_time_offset_sec(),
            command_repeat: default_command_repeat(),
            update_period_sec: default_update_period_sec(),
            open_retries: default_open_retries(),
            open_retry_delay_ms: default_open_retry_delay_ms(),
            chart_width: default_chart_width(),
            temperature_height: default_temperature_height(),
            humidity_height: default_humidity_height(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rcactus")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcactus.conf")
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the render pipeline cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.curve_alpha.is_empty() {
            return Err(AppError::Config(
                "curve_alpha needs at least one level".to_string(),
            ));
        }
        if let Some(a) = self.curve_alpha.iter().find(|a| !(0.0..=1.0).contains(*a)) {
            return Err(AppError::Config(format!(
                "curve_alpha values must lie in 0..=1, got {a}"
            )));
        }
        if self.stats_days <= 0 {
            return Err(AppError::Config(format!(
                "stats_days must be positive, got {}",
                self.stats_days
            )));
        }
        if self.command_repeat == 0 {
            return Err(AppError::Config(
                "command_repeat must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        expand_tilde(&self.log_file)
    }

    pub fn cmd_path(&self) -> PathBuf {
        expand_tilde(&self.cmd_file)
    }

    pub fn ini_path(&self) -> PathBuf {
        expand_tilde(&self.ini_file)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    /// Write this configuration to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Keys missing from the YAML file at `path` (their defaults are in use).
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path)?;
        let yaml: Value = serde_yaml::from_str(&content)?;
        let Some(map) = yaml.as_mapping() else {
            return Err(AppError::Config(format!(
                "{} is not a YAML mapping",
                path.display()
            )));
        };

        let missing: Vec<&'static str> = CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(Value::String(k.to_string())))
            .collect();
        Ok(missing)
    }
}
