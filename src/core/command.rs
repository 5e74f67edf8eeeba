use crate::errors::AppResult;
use crate::models::command::{CommandRequest, ParamCommand};
use crate::utils::path::staging_path;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct CommandLogic;

impl CommandLogic {
    /// Validate `request` and store it as the pending command.
    ///
    /// Nothing touches the disk unless validation passes. The line is staged
    /// next to `cmd_file` and renamed over it, so the collector never reads a
    /// half-written command.
    pub fn submit(
        request: &CommandRequest,
        cmd_file: &Path,
        magic: i64,
    ) -> AppResult<ParamCommand> {
        let command = request.validate(magic)?;

        if let Some(parent) = cmd_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let staged = staging_path(cmd_file);
        {
            let mut f = fs::File::create(&staged)?;
            f.write_all(command.to_line(magic).as_bytes())?;
            f.sync_all()?;
        }
        fs::rename(&staged, cmd_file)?;

        Ok(command)
    }

    /// The command still waiting for the collector, if any.
    pub fn pending(cmd_file: &Path, magic: i64) -> AppResult<Option<ParamCommand>> {
        if !cmd_file.exists() {
            return Ok(None);
        }
        let line = fs::read_to_string(cmd_file)?;
        ParamCommand::from_line(line.trim(), magic).map(Some)
    }
}
