use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{check_file, migrate_file};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

use std::process::Command;

fn edit(editor: &Option<String>) {
    let path = Config::config_file();

    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });
    let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(&path).status() {
        Ok(s) if s.success() => {
            success(format!("Configuration file edited using '{}'", editor_to_use));
        }
        _ => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            ));
            match Command::new(&default_editor).arg(&path).status() {
                Ok(s) if s.success() => success(format!(
                    "Configuration file edited using fallback '{}'",
                    default_editor
                )),
                _ => error(format!(
                    "Failed to edit configuration file using fallback '{}'",
                    default_editor
                )),
            }
        }
    }
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use). Run `rtasks init`.",
                    path.display()
                ));
            } else {
                let report = check_file(&path)?;
                if report.is_clean() {
                    success("Configuration file is complete.");
                }
                for key in &report.missing {
                    warning(format!("Missing field: {}", key));
                }
                for key in &report.unknown {
                    info(format!("Unknown field (ignored): {}", key));
                }
            }
        }

        if *migrate {
            if !path.exists() {
                warning("No configuration file to migrate. Run `rtasks init`.");
            } else {
                let added = migrate_file(&path)?;
                if added.is_empty() {
                    info("Configuration already up to date.");
                } else {
                    success(format!("Added fields: {}", added.join(", ")));
                }
            }
        }

        if *edit_config {
            edit(editor);
        }
    }

    Ok(())
}
