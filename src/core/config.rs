use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            println!("📄 {}:\n", path.display());
            println!("{}", content);
        } else {
            info(format!(
                "No configuration file at {}, showing defaults:",
                path.display()
            ));
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| AppError::Config(format!("cannot serialize config: {e}")))?;
            println!("{}", yaml);
        }
        Ok(())
    }

    pub fn check(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!("Configuration file {} not found.", path.display()));
            return Ok(());
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!(
                "Missing fields (defaults in use): {}",
                missing.join(", ")
            ));
            info("Run `wstation config --migrate` to write them to the file.");
        }
        Ok(())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!("Configuration file {} not found.", path.display()));
            return Ok(());
        }

        let added = migrate_config_file(path)?;
        if added.is_empty() {
            info("Configuration file already up to date.");
        } else {
            success(format!("Added fields: {}", added.join(", ")));
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{requested}'"));
                Ok(())
            }
            _ if requested != default_editor => {
                warning(format!(
                    "Editor '{requested}' not available, falling back to '{default_editor}'"
                ));
                let status = Command::new(&default_editor)
                    .arg(path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;
                if status.success() {
                    success(format!(
                        "Configuration file edited using fallback '{default_editor}'"
                    ));
                    Ok(())
                } else {
                    Err(AppError::Config(format!(
                        "editor '{default_editor}' exited with {status}"
                    )))
                }
            }
            Ok(s) => Err(AppError::Config(format!(
                "editor '{requested}' exited with {s}"
            ))),
            Err(e) => Err(AppError::Config(e.to_string())),
        }
    }
}
