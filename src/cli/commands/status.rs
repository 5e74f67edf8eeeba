use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use chrono::NaiveDate;

/// Handle the `status` command
pub fn handle(cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let report = StatusLogic::report(cfg, today)?;

    header("rcactus status");

    match &report.last {
        Some(r) => {
            info(format!("Last reading : {}", r.timestamp.format("%Y-%m-%d %H:%M")));
            info(format!(
                "Temperature  : {:.1} °C{}",
                r.temperature_primary,
                r.temperature_secondary
                    .map(|t| format!(" / {:.1} °C", t))
                    .unwrap_or_default()
            ));
            if !r.humidity.is_nan() {
                info(format!("Humidity     : {:.0} %", r.humidity));
            }
            info(format!(
                "Heater       : {} ({}), heat from {:.0} to {:.0} °C",
                r.mode.label(),
                if r.heater_on { "on" } else { "off" },
                r.heater_from,
                r.heater_to
            ));
            info(format!(
                "Light        : {}",
                if r.light_on { "on" } else { "off" }
            ));
        }
        None => warning("No records in the log yet"),
    }

    match &report.pending {
        Some(cmd) => warning(format!(
            "Pending command: mode={} heat {:.1}..{:.1} light={}",
            cmd.mode.label(),
            cmd.heater_from,
            cmd.heater_to,
            u8::from(cmd.light_on)
        )),
        None => info("No pending command"),
    }

    info(format!(
        "Records: {} | Malformed: {} | Days shown: {}",
        report.records, report.malformed, report.days_in_horizon
    ));
    Ok(())
}
