//! Command delivery to the sensor node.
//!
//! The serial link gives no acknowledgment, so a command is written several
//! times in one burst and considered delivered once sent. Lost bursts are not
//! detected.

use crate::errors::AppResult;
use std::fs;
use std::io::Write;
use std::path::Path;

/// `content` repeated `repeat` times, space separated.
pub fn repeated_payload(content: &str, repeat: usize) -> String {
    vec![content.trim(); repeat].join(" ")
}

pub struct CommandRelay {
    pub repeat: usize,
}

impl CommandRelay {
    pub fn new(repeat: usize) -> Self {
        Self {
            repeat: repeat.max(1),
        }
    }

    /// Send the command in `cmd_file` to `sink`, if the file exists.
    ///
    /// The burst ends with a newline so it never runs into the next one.
    /// With `rename_to`, the command file then replaces that file; the rename
    /// marks the command as applied. Returns whether anything was sent.
    pub fn execute<W: Write>(
        &self,
        cmd_file: &Path,
        sink: &mut W,
        rename_to: Option<&Path>,
    ) -> AppResult<bool> {
        if !cmd_file.is_file() {
            return Ok(false);
        }

        let content = fs::read_to_string(cmd_file)?;
        sink.write_all(repeated_payload(&content, self.repeat).as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()?;

        if let Some(dst) = rename_to {
            if dst.exists() {
                fs::remove_file(dst)?;
            }
            fs::rename(cmd_file, dst)?;
        }

        Ok(true)
    }
}
