// src/export/logic.rs

use crate::config::Config;
use crate::core::retention::LAST_SHIFT_KEY;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult, RestoreError};
use crate::export::fs_utils::{has_extension, prepare_target};
use crate::export::json_csv::{read_json_from_zip, write_csv, write_json, zip_file};
use crate::export::model::BackupRecord;
use crate::export::notify_export_success;
use crate::models::SampleRow;
use crate::ui::messages::{info, warning};
use chrono::{Datelike, NaiveDate};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// `MM-DD-weatherstation.<ext>` for the given date.
pub fn export_file_name(today: NaiveDate, ext: &str) -> String {
    format!("{:02}-{:02}-weatherstation.{ext}", today.month(), today.day())
}

/// High-level export, backup and restore operations.
pub struct ExportLogic;

impl ExportLogic {
    /// Dump every row as CSV into the export directory.
    pub fn export_csv(pool: &mut DbPool, cfg: &Config, today: NaiveDate) -> AppResult<PathBuf> {
        let root = PathBuf::from(&cfg.storage_root);
        let target = prepare_target(&root, &cfg.export_path(), &export_file_name(today, "csv"))?;

        let rows = queries::all_rows(&pool.conn)?;
        ensure_finite(&rows)?;
        info(format!("Exporting {} rows to CSV: {}", rows.len(), target.display()));
        write_csv(&rows, &target)?;

        ttlog_quiet(
            &pool.conn,
            "export",
            &target.to_string_lossy(),
            &format!("CSV export of {} rows", rows.len()),
        );
        notify_export_success("CSV", &target);
        Ok(target)
    }

    /// Back up every row as JSON, optionally packaged as a zip archive.
    pub fn backup_json(
        pool: &mut DbPool,
        cfg: &Config,
        today: NaiveDate,
        compress: bool,
    ) -> AppResult<PathBuf> {
        let root = PathBuf::from(&cfg.storage_root);
        let dir = cfg.export_path();
        let target = prepare_target(&root, &dir, &export_file_name(today, "json"))?;

        let rows = queries::all_rows(&pool.conn)?;
        ensure_finite(&rows)?;
        info(format!("Backing up {} rows to JSON: {}", rows.len(), target.display()));
        write_json(&rows, &target)?;

        let final_path = if compress {
            let zip_target = prepare_target(&root, &dir, &export_file_name(today, "zip"))?;
            zip_file(&target, &zip_target)?;

            if let Err(e) = fs::remove_file(&target) {
                warning(format!("Failed to remove uncompressed backup: {e}"));
            }
            zip_target
        } else {
            target
        };

        ttlog_quiet(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            &format!(
                "JSON backup of {} rows{}",
                rows.len(),
                if compress { " (compressed)" } else { "" }
            ),
        );
        notify_export_success("Backup", &final_path);
        Ok(final_path)
    }

    /// Replace the whole store with the content of a JSON (or zipped JSON) backup.
    ///
    /// The file is parsed completely before anything is touched; wipe and
    /// reinsert run in one transaction. Returns the number of restored rows.
    pub fn restore_json(pool: &mut DbPool, path: &Path) -> Result<usize, RestoreError> {
        let rows = read_backup(path)?;

        let tx = pool.conn.transaction()?;
        queries::wipe_all(&tx)?;
        for r in &rows {
            queries::insert_row(&tx, r)?;
        }
        queries::delete_meta(&tx, LAST_SHIFT_KEY)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "restore",
            &path.to_string_lossy(),
            &format!("Restored {} rows", rows.len()),
        );
        Ok(rows.len())
    }

    /// Backup files (`.json` / `.zip`) in the export directory, sorted by name.
    pub fn list_backups(cfg: &Config) -> AppResult<Vec<PathBuf>> {
        let dir = cfg.export_path();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_extension(p, &["json", "zip"]))
            .collect();
        files.sort();
        Ok(files)
    }
}

/// JSON has no NaN or infinity: such a row would be written as `null` and
/// the backup could not be restored.
fn ensure_finite(rows: &[SampleRow]) -> AppResult<()> {
    match rows.iter().find(|r| !r.is_finite()) {
        Some(bad) => Err(AppError::Export(format!(
            "row {} (slot {}, {:02}:00) holds a non-finite value",
            bad.id, bad.day_slot, bad.hour
        ))),
        None => Ok(()),
    }
}

/// Parse a backup file into rows without touching the store.
pub fn read_backup(path: &Path) -> Result<Vec<SampleRow>, RestoreError> {
    let text = if has_extension(path, &["zip"]) {
        let file = File::open(path).map_err(|source| RestoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        read_json_from_zip(file).map_err(|reason| RestoreError::Archive {
            path: path.to_path_buf(),
            reason,
        })?
    } else {
        fs::read_to_string(path).map_err(|source| RestoreError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };

    let records: Vec<BackupRecord> =
        serde_json::from_str(&text).map_err(|source| RestoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(records.into_iter().map(SampleRow::from).collect())
}
