use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            info(format!("Current configuration ({}):\n", path.display()));
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}, defaults are in use",
                    path.display()
                ));
            } else {
                let missing = Config::missing_keys(path)?;
                if missing.is_empty() {
                    success("Configuration file is complete");
                } else {
                    for key in missing {
                        warning(format!("Missing '{key}', using the default"));
                    }
                }
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.as_deref().unwrap_or(&default_editor);

            if launch(editor_to_use, path) {
                success(format!("Configuration edited with '{editor_to_use}'"));
            } else if editor_to_use != default_editor {
                warning(format!(
                    "Editor '{editor_to_use}' failed, falling back to '{default_editor}'"
                ));
                if launch(&default_editor, path) {
                    success(format!("Configuration edited with '{default_editor}'"));
                } else {
                    error(format!("Failed to edit configuration with '{default_editor}'"));
                }
            } else {
                error(format!("Failed to edit configuration with '{editor_to_use}'"));
            }
        }
    }

    Ok(())
}

/// Run `editor` on `path`; true when it exits successfully.
fn launch(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}
