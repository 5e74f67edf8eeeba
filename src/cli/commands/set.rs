use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::command::CommandLogic;
use crate::errors::AppResult;
use crate::models::command::CommandRequest;
use crate::ui::messages::success;

/// Handle the `set` command: validate and queue a parameter change.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Set {
        mode,
        heater_from,
        heater_to,
        light,
    } = cmd
    {
        let request = CommandRequest {
            mode: *mode,
            heater_from: *heater_from,
            heater_to: *heater_to,
            light: *light,
        };

        let command = CommandLogic::submit(&request, &cfg.cmd_path(), cfg.magic)?;

        success(format!(
            "Command queued: mode={} heat {:.1}..{:.1} °C light={}",
            command.mode.label(),
            command.heater_from,
            command.heater_to,
            if command.light_on { "on" } else { "off" }
        ));
    }
    Ok(())
}
