use crate::config::Config;
use crate::core::collector::Collector;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::fs::OpenOptions;
use std::io::BufReader;

/// Handle the `collect` command
///
/// The device is opened as a plain file; line settings (baud rate etc.) are
/// expected to be configured outside this tool.
pub fn handle(device: Option<&str>, cfg: &Config) -> AppResult<()> {
    let path = expand_tilde(device.unwrap_or(cfg.serial_device.as_str()));
    let port = OpenOptions::new().read(true).write(true).open(&path)?;
    let mut node = port.try_clone()?;

    info(format!("Listening on {}", path.display()));
    info(format!("Logging to   {}", cfg.log_path().display()));

    let mut collector = Collector::new(cfg)?;
    let logged = collector.run(BufReader::new(port), &mut node)?;

    success(format!("Input closed, {logged} rows logged"));
    Ok(())
}
