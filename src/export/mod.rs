// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod jobs;
pub mod logic;
pub mod model;

pub use jobs::{Job, JobHandle, JobOutcome, JobRunner};
pub use logic::{ExportLogic, export_file_name, read_backup};
pub use model::BackupRecord;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for exports and backups.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} completed: {}", path.display()));
}
