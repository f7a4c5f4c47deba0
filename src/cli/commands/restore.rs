use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportLogic, Job, JobOutcome, JobRunner};
use crate::ui::messages::success;
use chrono::Local;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file, latest } = cmd {
        let path = match (file, *latest) {
            (Some(f), _) => PathBuf::from(f),
            (None, true) => latest_backup(cfg)?,
            (None, false) => {
                return Err(AppError::Other(
                    "specify a backup with --file FILE or use --latest".into(),
                ));
            }
        };

        let runner = JobRunner::new();
        let outcome = runner
            .submit(Job::Restore { path }, cfg, Local::now().date_naive())?
            .wait()?;

        if let JobOutcome::Restored { path, rows } = outcome {
            success(format!("Restored {rows} rows from {}", path.display()));
        }
    }

    Ok(())
}

/// Most recently modified backup in the export directory.
fn latest_backup(cfg: &Config) -> AppResult<PathBuf> {
    ExportLogic::list_backups(cfg)?
        .into_iter()
        .max_by_key(|p| p.metadata().and_then(|m| m.modified()).ok())
        .ok_or_else(|| {
            AppError::Other(format!(
                "no backups found in {}",
                cfg.export_path().display()
            ))
        })
}
