use crate::chart::ChartEmitter;
use crate::config::Config;
use crate::core::aligner::DayAligner;
use crate::core::compositor::{ChannelStyle, Compositor};
use crate::core::normalizer::{NormalizedLog, Normalizer};
use crate::core::snapshot::{LogSnapshot, RetryPolicy};
use crate::errors::AppResult;
use crate::models::plan::ChartPlan;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one render pass produced.
#[derive(Debug)]
pub struct RenderOutput {
    pub log: NormalizedLog,
    pub plans: Vec<ChartPlan>,
    pub images: Vec<PathBuf>,
}

pub struct RenderLogic;

impl RenderLogic {
    /// Read the log and normalize it against `today`.
    pub fn load(cfg: &Config, today: NaiveDate) -> AppResult<NormalizedLog> {
        let retry = RetryPolicy::new(cfg.open_retries, cfg.open_retry_delay_ms);
        let snapshot = LogSnapshot::read(&cfg.log_path(), retry)?;
        Ok(Normalizer::new(today, cfg.log_time_offset_sec).normalize(&snapshot.bytes))
    }

    /// Temperature and humidity plans for an already normalized log.
    pub fn build_plans(
        cfg: &Config,
        log: &NormalizedLog,
        today: NaiveDate,
        smooth: Option<usize>,
    ) -> Vec<ChartPlan> {
        let aligner = DayAligner::new(today, cfg.stats_days);
        let compositor = Compositor::from_config(cfg, today, smooth);

        [
            ChannelStyle::temperature(cfg.temperature_height),
            ChannelStyle::humidity(cfg.humidity_height),
        ]
        .into_iter()
        .map(|style| {
            let days = aligner.align(&log.records, style.channel);
            compositor.plan(&days, style)
        })
        .collect()
    }

    /// Full pass: read, normalize, align, smooth, composite and, when an
    /// emitter is given, write one image per channel into `out_dir`.
    pub fn render(
        cfg: &Config,
        today: NaiveDate,
        smooth: Option<usize>,
        emitter: Option<&dyn ChartEmitter>,
        out_dir: &Path,
    ) -> AppResult<RenderOutput> {
        let log = Self::load(cfg, today)?;
        let plans = Self::build_plans(cfg, &log, today, smooth);

        let mut images = Vec::new();
        if let Some(emitter) = emitter {
            fs::create_dir_all(out_dir)?;
            for plan in &plans {
                let path = out_dir
                    .join(plan.channel.file_stem())
                    .with_extension(emitter.extension());
                emitter.emit(plan, &path)?;
                images.push(path);
            }
        }

        Ok(RenderOutput { log, plans, images })
    }

    /// Dump plans as pretty JSON.
    pub fn write_plans(plans: &[ChartPlan], path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(plans)?;
        fs::write(path, json)?;
        Ok(())
    }
}
