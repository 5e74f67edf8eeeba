use crate::config::Config;
use crate::core::aligner::DayAligner;
use crate::core::command::CommandLogic;
use crate::core::render::RenderLogic;
use crate::errors::AppResult;
use crate::models::command::ParamCommand;
use crate::models::record::{Channel, LogRecord};
use chrono::NaiveDate;

#[derive(Debug)]
pub struct StatusReport {
    pub last: Option<LogRecord>,
    pub pending: Option<ParamCommand>,
    pub records: usize,
    pub malformed: usize,
    pub days_in_horizon: usize,
}

pub struct StatusLogic;

impl StatusLogic {
    pub fn report(cfg: &Config, today: NaiveDate) -> AppResult<StatusReport> {
        let log = RenderLogic::load(cfg, today)?;
        let days = DayAligner::new(today, cfg.stats_days).align(&log.records, Channel::Temperature);
        let pending = CommandLogic::pending(&cfg.cmd_path(), cfg.magic)?;

        Ok(StatusReport {
            last: log.last().cloned(),
            pending,
            records: log.records.len(),
            malformed: log.malformed_count(),
            days_in_horizon: days.len(),
        })
    }
}
