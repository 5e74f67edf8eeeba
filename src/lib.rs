//! rcactus library root.
//! Exposes the CLI parser, the high-level run() function and the telemetry
//! pipeline modules.

pub mod chart;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::NaiveDate;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path, today: NaiveDate) -> AppResult<()> {
    match &cli.command {
        Commands::Init { force } => cli::commands::init::handle(*force, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Render { .. } => cli::commands::render::handle(&cli.command, cfg, today),
        Commands::Set { .. } => cli::commands::set::handle(&cli.command, cfg),
        Commands::Status => cli::commands::status::handle(cfg, today),
        Commands::Collect { device } => cli::commands::collect::handle(device.as_deref(), cfg),
    }
}

fn resolve_today(cli: &Cli) -> AppResult<NaiveDate> {
    match &cli.today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidTimestamp(s.clone())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once, from --config or the standard location
    let config_path = cli
        .config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file);
    let cfg = Config::load_from(&config_path)?;

    // 3️⃣ resolve the render reference date
    let today = resolve_today(&cli)?;

    dispatch(&cli, &cfg, &config_path, today)
}
