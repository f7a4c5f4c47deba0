#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;
use wstation::config::Config;
use wstation::core::aggregator::{DayAggregator, WriteOutcome};
use wstation::db::pool::DbPool;
use wstation::models::{DaySlot, Sample, SampleRow};

/// Binary under test, with HOME pointed at a scratch directory so the
/// user's real configuration is never read or written.
pub fn ws() -> Command {
    let mut cmd = cargo_bin_cmd!("wstation");
    cmd.env("HOME", test_home()).env("NO_COLOR", "1");
    cmd
}

pub fn test_home() -> PathBuf {
    let mut path = env::temp_dir();
    path.push("wstation_test_home");
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wstation.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty storage root for exports and backups
pub fn setup_storage(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wstation_storage", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create storage root");
    path
}

/// Configuration pointing at the given test database and storage root
pub fn test_config(db_path: &str, storage: &PathBuf) -> Config {
    Config {
        database: db_path.to_string(),
        storage_root: storage.to_string_lossy().to_string(),
        ..Config::default()
    }
}

pub fn open_pool(db_path: &str) -> DbPool {
    DbPool::open(db_path).expect("open test db")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid test timestamp")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Append one sample to slot 1 and return the stored row
pub fn record(pool: &mut DbPool, hour: u32, day: u32, t: f64, p: f64, h: f64) -> SampleRow {
    let sample = Sample::new(hour, day, t, p, h).expect("valid sample");
    match DayAggregator::record_sample(pool, DaySlot::TODAY, &sample).expect("record sample") {
        WriteOutcome::Written(row) => row,
        WriteOutcome::AlreadyPresent => panic!("hour {hour} already present"),
    }
}

/// Initialize DB via the CLI and record a few hours of one day
pub fn init_db_with_data(db_path: &str) {
    ws().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (hour, t, p, h) in [
        ("08", "12.5", "1012.3", "61.0"),
        ("09", "14.25", "1013.1", "58.5"),
        ("10", "16.75", "1013.8", "55.0"),
    ] {
        ws().args([
            "--db",
            db_path,
            "record",
            "--temp",
            t,
            "--press",
            p,
            "--humid",
            h,
            "--at",
            &format!("2025-06-14T{hour}:00:05"),
        ])
        .assert()
        .success();
    }
}
