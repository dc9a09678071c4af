use crate::config::Config;
use crate::config::migrate::fill_missing_keys;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the file as stored, or the effective values when there is none.
    pub fn print(path: &Path, effective: &Config) -> AppResult<()> {
        println!("📄 Current configuration ({}):\n", path.display());
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            println!("{content}");
        } else {
            warning("No configuration file, showing defaults.");
            println!("{}", serde_yaml::to_string(effective)?);
        }
        Ok(())
    }

    /// Add keys introduced by newer versions. Returns what was added.
    pub fn check(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file not found: {} (run `eventalert init`)",
                path.display()
            )));
        }

        let added = fill_missing_keys(path)?;
        if added.is_empty() {
            success("Configuration file is complete.");
        } else {
            for key in &added {
                info(format!("Added missing key '{key}' with its default value"));
            }
            success(format!("Configuration updated: {}", path.display()));
        }
        Ok(added)
    }

    /// Open the file in `editor`, then `$EDITOR`/`$VISUAL`, then the
    /// platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{requested}'"));
                Ok(())
            }
            _ if requested != default_editor => {
                warning(format!(
                    "Editor '{requested}' not available, falling back to '{default_editor}'"
                ));
                match Command::new(&default_editor).arg(path).status() {
                    Ok(s) if s.success() => {
                        success(format!("Configuration file edited using '{default_editor}'"));
                        Ok(())
                    }
                    _ => Err(AppError::Config(format!("failed to run editor '{default_editor}'"))),
                }
            }
            _ => Err(AppError::Config(format!("failed to run editor '{requested}'"))),
        }
    }
}
