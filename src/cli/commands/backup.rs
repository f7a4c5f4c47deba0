use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, Job, JobRunner};
use crate::ui::messages::info;
use chrono::Local;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { compress, list } = cmd {
        if *list {
            return print_backups(cfg);
        }

        let runner = JobRunner::new();
        runner
            .submit(
                Job::BackupJson {
                    compress: *compress,
                },
                cfg,
                Local::now().date_naive(),
            )?
            .wait()?;
    }

    Ok(())
}

fn print_backups(cfg: &Config) -> AppResult<()> {
    let files = ExportLogic::list_backups(cfg)?;
    if files.is_empty() {
        info(format!("No backups in {}", cfg.export_path().display()));
        return Ok(());
    }

    println!("💾 Backups in {}:\n", cfg.export_path().display());
    for f in files {
        let size = fs::metadata(&f).map(|m| m.len()).unwrap_or(0);
        let name = f
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {:<32} {:>8.1} KB", name, size as f64 / 1024.0);
    }
    Ok(())
}
