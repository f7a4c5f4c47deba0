// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Check storage, create the export directory and clear the target name.
///
/// - `root` missing or not a directory → `StorageUnavailable`
/// - export directory cannot be created → `Export`
/// - an existing file with the target name cannot be deleted → `Export`
pub(crate) fn prepare_target(root: &Path, dir: &Path, file_name: &str) -> AppResult<PathBuf> {
    if !root.is_dir() {
        return Err(AppError::StorageUnavailable(root.to_path_buf()));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Export(format!("cannot create folder {}: {e}", dir.display()))
        })?;
    }

    let target = dir.join(file_name);
    if target.exists() {
        fs::remove_file(&target).map_err(|e| {
            AppError::Export(format!(
                "cannot delete existing file {}: {e}",
                target.display()
            ))
        })?;
    }

    Ok(target)
}

/// Hidden sibling used while a file is being written.
fn part_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    path.with_file_name(format!(".{name}.part"))
}

/// Write through a temporary file renamed into place on success.
/// On any failure the temporary file is removed and `path` is not created.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> AppResult<()>,
{
    let part = part_path(path);

    let result: AppResult<()> = (|| {
        let mut w = BufWriter::new(File::create(&part)?);
        write(&mut w)?;
        w.flush()?;
        w.get_ref().sync_all()?;
        drop(w);
        fs::rename(&part, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}

/// `true` when the file name ends with one of `exts` (case-insensitive).
pub(crate) fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .map(|e| {
            let e = e.to_string_lossy().to_ascii_lowercase();
            exts.iter().any(|x| *x == e)
        })
        .unwrap_or(false)
}
