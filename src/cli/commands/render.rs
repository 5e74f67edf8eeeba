use crate::chart::{ChartEmitter, PngEmitter};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::render::RenderLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;

/// Handle the `render` command
pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Render {
        out,
        smooth,
        plan,
        no_image,
    } = cmd
    {
        let out_dir = out
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.output_path());

        let png = PngEmitter;
        let emitter: Option<&dyn ChartEmitter> = if *no_image { None } else { Some(&png) };

        let output = RenderLogic::render(cfg, today, *smooth, emitter, &out_dir)?;

        info(format!(
            "{} records read, {} malformed lines skipped",
            output.log.records.len(),
            output.log.malformed_count()
        ));
        if output.log.malformed_count() > 0 {
            for bad in output.log.malformed.iter().take(5) {
                warning(format!("line {}: {}", bad.line, bad.reason));
            }
        }

        for p in &output.plans {
            info(format!(
                "{}: {} lines, {} band fills",
                p.title,
                p.lines().count(),
                p.fills().count()
            ));
        }

        if let Some(plan_file) = plan {
            let path = expand_tilde(plan_file);
            RenderLogic::write_plans(&output.plans, &path)?;
            success(format!("Chart plans written to {}", path.display()));
        }

        for image in &output.images {
            success(format!("Chart saved: {}", image.display()));
        }
    }
    Ok(())
}
