use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// Writes the default configuration to `config_path` and creates the
/// directories the log, command files and charts live in.
pub fn handle(force: bool, config_path: &Path) -> AppResult<()> {
    if config_path.exists() && !force {
        warning(format!(
            "Configuration already exists: {} (use --force to overwrite)",
            config_path.display()
        ));
        return Ok(());
    }

    let cfg = Config::default();
    cfg.save_to(config_path)?;

    for dir in [cfg.log_path(), cfg.cmd_path(), cfg.ini_path()]
        .iter()
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .chain(std::iter::once(cfg.output_path()))
    {
        fs::create_dir_all(&dir)?;
    }

    info(format!("Config file : {}", config_path.display()));
    info(format!("Log file    : {}", cfg.log_path().display()));
    info(format!("Charts dir  : {}", cfg.output_path().display()));
    success("rcactus initialization completed!");
    Ok(())
}
