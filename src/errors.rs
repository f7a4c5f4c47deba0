//! Unified application error type.
//! All modules (db, core, export, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid hour: {0} (expected 0-23)")]
    InvalidHour(u32),

    #[error("Invalid day slot: {0} (expected 1-31)")]
    InvalidSlot(u32),

    #[error("Invalid day of month: {0} (expected 1-31)")]
    InvalidDay(u32),

    #[error("Invalid sensor channel: {0}")]
    InvalidChannel(String),

    #[error("Invalid {channel} value: {value} (expected a finite number)")]
    InvalidValue { channel: &'static str, value: f64 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid sensor feed line {line}: {reason}")]
    InvalidFeed { line: usize, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export / backup / restore errors
    // ---------------------------
    #[error("External storage not available: {0}")]
    StorageUnavailable(PathBuf),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Another export, backup or restore is already running")]
    JobInFlight,

    #[error("Restore failed: {0}")]
    Restore(#[from] RestoreError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

/// Why a restore did not happen. The store is left untouched for every
/// variant except `Db`, where the transaction is rolled back.
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("cannot read backup file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open backup archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("malformed backup file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("database rejected restored rows: {0}")]
    Db(#[from] rusqlite::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Export(format!("JSON serialization error: {e}"))
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(format!("CSV error: {e}"))
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(e: zip::result::ZipError) -> Self {
        AppError::Export(format!("ZIP error: {e}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
