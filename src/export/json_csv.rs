// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::fs_utils::write_atomically;
use crate::export::model::{BackupRecord, CSV_HEADERS, row_to_record};
use crate::models::SampleRow;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Header line plus one line per row.
pub(crate) fn write_csv(rows: &[SampleRow], path: &Path) -> AppResult<()> {
    write_atomically(path, |out| {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);

        wtr.write_record(CSV_HEADERS)?;
        for r in rows {
            wtr.write_record(row_to_record(r))?;
        }
        wtr.flush()?;
        Ok(())
    })
}

/// JSON array of flat backup records.
pub(crate) fn write_json(rows: &[SampleRow], path: &Path) -> AppResult<()> {
    let records: Vec<BackupRecord> = rows.iter().map(BackupRecord::from).collect();

    write_atomically(path, |out| {
        serde_json::to_writer(&mut *out, &records)?;
        Ok(())
    })
}

/// Package `src` as the single entry of a deflated zip archive at `dest`.
pub(crate) fn zip_file(src: &Path, dest: &Path) -> AppResult<()> {
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.json".to_string());

    write_atomically(dest, |out| {
        let mut zip = ZipWriter::new(&mut *out);
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file(entry_name, options)?;
        let mut f = File::open(src)?;
        std::io::copy(&mut f, &mut zip)?;
        zip.finish()?;
        Ok(())
    })
}

/// Content of the first `.json` entry of a zip archive.
pub(crate) fn read_json_from_zip<R: Read + Seek>(reader: R) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| e.to_string())?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| e.to_string())?;
        if entry.name().to_ascii_lowercase().ends_with(".json") {
            let mut text = String::new();
            entry.read_to_string(&mut text).map_err(|e| e.to_string())?;
            return Ok(text);
        }
    }

    Err("archive contains no .json entry".to_string())
}
