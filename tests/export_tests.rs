mod common;
use common::{date, open_pool, record, setup_storage, setup_test_db, test_config};
use std::fs;
use std::io::Write;
use wstation::core::retention::LAST_SHIFT_KEY;
use wstation::db::queries;
use wstation::errors::{AppError, RestoreError};
use wstation::export::{ExportLogic, Job, JobOutcome, JobRunner, export_file_name};

#[test]
fn test_export_file_name_uses_month_and_day() {
    assert_eq!(
        export_file_name(date(2025, 3, 7), "csv"),
        "03-07-weatherstation.csv"
    );
    assert_eq!(
        export_file_name(date(2025, 12, 31), "json"),
        "12-31-weatherstation.json"
    );
}

#[test]
fn test_export_csv_writes_header_and_rows() {
    let db_path = setup_test_db("export_csv_rows");
    let storage = setup_storage("export_csv_rows");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    record(&mut pool, 9, 14, 14.25, 1013.1, 58.5);

    let path = ExportLogic::export_csv(&mut pool, &cfg, date(2025, 6, 14)).unwrap();

    assert_eq!(
        path,
        storage.join("WeatherStation").join("06-14-weatherstation.csv")
    );
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Timestamp,Datestamp,Daynumber,Temperature"));
    assert!(lines[0].ends_with("MaxHumidity,MinHumidity,AverageHumidity"));
    assert_eq!(lines[1].split(',').count(), 15);
    assert!(lines[2].starts_with("9,14,1,14.25,1013.1,58.5,"));
}

#[test]
fn test_export_replaces_existing_file() {
    let db_path = setup_test_db("export_csv_replace");
    let storage = setup_storage("export_csv_replace");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);

    let dir = storage.join("WeatherStation");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("06-14-weatherstation.csv"), "stale").unwrap();

    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    let path = ExportLogic::export_csv(&mut pool, &cfg, date(2025, 6, 14)).unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(!content.contains("stale"));
    assert!(content.starts_with("Timestamp"));
}

#[test]
fn test_export_without_storage_fails_and_writes_nothing() {
    let db_path = setup_test_db("export_no_storage");
    let storage = setup_storage("export_no_storage");
    let missing = storage.join("not-mounted");
    let cfg = test_config(&db_path, &missing);
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);

    let err = ExportLogic::export_csv(&mut pool, &cfg, date(2025, 6, 14)).unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(p) if p == missing));

    let err = ExportLogic::backup_json(&mut pool, &cfg, date(2025, 6, 14), false).unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)));

    assert!(!missing.exists());
}

#[test]
fn test_backup_then_restore_reproduces_rows() {
    let db_path = setup_test_db("export_roundtrip");
    let storage = setup_storage("export_roundtrip");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);

    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    record(&mut pool, 9, 14, 14.25, 1013.1, 58.5);
    record(&mut pool, 10, 14, 16.75, 1013.8, 55.0);
    let before = queries::all_rows(&pool.conn).unwrap();

    let path = ExportLogic::backup_json(&mut pool, &cfg, date(2025, 6, 14), false).unwrap();
    assert!(path.ends_with("06-14-weatherstation.json"));

    // change the store, then restore over it
    record(&mut pool, 11, 14, 30.0, 990.0, 20.0);
    queries::set_meta(&pool.conn, LAST_SHIFT_KEY, "2025-06-14").unwrap();

    let restored = ExportLogic::restore_json(&mut pool, &path).unwrap();
    assert_eq!(restored, 3);

    let after = queries::all_rows(&pool.conn).unwrap();
    assert_eq!(after.len(), before.len());
    for (a, b) in after.iter().zip(before.iter()) {
        assert!(a.same_content(b), "{a:?} != {b:?}");
    }
    assert_eq!(queries::get_meta(&pool.conn, LAST_SHIFT_KEY).unwrap(), None);
}

#[test]
fn test_backup_uses_canonical_humidity_min_key() {
    let db_path = setup_test_db("export_mih_key");
    let storage = setup_storage("export_mih_key");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);

    let path = ExportLogic::backup_json(&mut pool, &cfg, date(2025, 6, 14), false).unwrap();
    let content = fs::read_to_string(path).unwrap();

    assert!(content.contains("\"mih\":61.0"));
    assert!(!content.contains("minh"));
}

#[test]
fn test_restore_accepts_legacy_minh_key() {
    let db_path = setup_test_db("export_legacy_minh");
    let storage = setup_storage("export_legacy_minh");
    let mut pool = open_pool(&db_path);

    let legacy = storage.join("legacy.json");
    fs::write(
        &legacy,
        r#"[{"ts":7,"ds":3,"dn":2,"t":9.5,"p":1001.0,"h":77.0,
             "mat":9.5,"mit":9.5,"avt":9.5,"map":1001.0,"mip":1001.0,"avp":1001.0,
             "mah":77.0,"minh":77.0,"avh":77.0}]"#,
    )
    .unwrap();

    assert_eq!(ExportLogic::restore_json(&mut pool, &legacy).unwrap(), 1);

    let rows = queries::all_rows(&pool.conn).unwrap();
    assert_eq!(rows[0].day_slot, 2);
    assert_eq!(rows[0].humid_stats.min, 77.0);
}

#[test]
fn test_malformed_restore_leaves_store_untouched() {
    let db_path = setup_test_db("export_malformed");
    let storage = setup_storage("export_malformed");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    record(&mut pool, 9, 14, 14.25, 1013.1, 58.5);

    let broken = storage.join("broken.json");
    fs::write(&broken, r#"[{"ts":7,"ds":3,"dn":1,"t":"warm"}]"#).unwrap();

    let err = ExportLogic::restore_json(&mut pool, &broken).unwrap_err();
    assert!(matches!(err, RestoreError::Malformed { .. }));
    assert_eq!(queries::count_rows(&pool.conn).unwrap(), 2);
}

#[test]
fn test_restore_missing_file_is_a_read_error() {
    let db_path = setup_test_db("export_restore_missing");
    let storage = setup_storage("export_restore_missing");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);

    let err = ExportLogic::restore_json(&mut pool, &storage.join("nope.json")).unwrap_err();
    assert!(matches!(err, RestoreError::Read { .. }));
    assert_eq!(queries::count_rows(&pool.conn).unwrap(), 1);
}

#[test]
fn test_restore_rejecting_rows_rolls_back() {
    let db_path = setup_test_db("export_restore_rollback");
    let storage = setup_storage("export_restore_rollback");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);

    // slot 40 parses fine but violates the slot range of the table
    let bad = storage.join("bad_slot.json");
    fs::write(
        &bad,
        r#"[{"ts":7,"ds":3,"dn":40,"t":1.0,"p":1.0,"h":1.0,
             "mat":1.0,"mit":1.0,"avt":1.0,"map":1.0,"mip":1.0,"avp":1.0,
             "mah":1.0,"mih":1.0,"avh":1.0}]"#,
    )
    .unwrap();

    let err = ExportLogic::restore_json(&mut pool, &bad).unwrap_err();
    assert!(matches!(err, RestoreError::Db(_)));
    assert_eq!(queries::count_rows(&pool.conn).unwrap(), 1);
}

#[test]
fn test_compressed_backup_round_trip() {
    let db_path = setup_test_db("export_zip_roundtrip");
    let storage = setup_storage("export_zip_roundtrip");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    record(&mut pool, 9, 14, 14.25, 1013.1, 58.5);

    let path = ExportLogic::backup_json(&mut pool, &cfg, date(2025, 6, 14), true).unwrap();

    assert!(path.ends_with("06-14-weatherstation.zip"));
    assert!(path.exists());
    assert!(!path.with_extension("json").exists());

    wstation::core::retention::Retention::clear_all(&mut pool).unwrap();
    assert_eq!(ExportLogic::restore_json(&mut pool, &path).unwrap(), 2);
    assert_eq!(queries::count_rows(&pool.conn).unwrap(), 2);
}

#[test]
fn test_corrupt_zip_is_an_archive_error() {
    let db_path = setup_test_db("export_corrupt_zip");
    let storage = setup_storage("export_corrupt_zip");
    let mut pool = open_pool(&db_path);

    let fake = storage.join("fake.zip");
    let mut f = fs::File::create(&fake).unwrap();
    f.write_all(b"this is not a zip archive").unwrap();

    let err = ExportLogic::restore_json(&mut pool, &fake).unwrap_err();
    assert!(matches!(err, RestoreError::Archive { .. }));
}

#[test]
fn test_list_backups_filters_and_sorts() {
    let db_path = setup_test_db("export_list_backups");
    let storage = setup_storage("export_list_backups");
    let cfg = test_config(&db_path, &storage);

    assert!(ExportLogic::list_backups(&cfg).unwrap().is_empty());

    let dir = cfg.export_path();
    fs::create_dir_all(&dir).unwrap();
    for name in [
        "06-14-weatherstation.json",
        "05-01-weatherstation.ZIP",
        "06-14-weatherstation.csv",
        "notes.txt",
    ] {
        fs::write(dir.join(name), "x").unwrap();
    }

    let names: Vec<String> = ExportLogic::list_backups(&cfg)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["05-01-weatherstation.ZIP", "06-14-weatherstation.json"]
    );
}

#[test]
fn test_job_runner_reports_outcome() {
    let db_path = setup_test_db("export_job_runner");
    let storage = setup_storage("export_job_runner");
    let cfg = test_config(&db_path, &storage);
    {
        let mut pool = open_pool(&db_path);
        record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    }

    let runner = JobRunner::new();
    let outcome = runner
        .submit(Job::ExportCsv, &cfg, date(2025, 6, 14))
        .unwrap()
        .wait()
        .unwrap();

    let JobOutcome::Exported(path) = outcome else {
        panic!("expected an export outcome, got {outcome:?}");
    };
    assert!(path.exists());
    assert!(!runner.is_busy());

    let handle = runner
        .submit(Job::BackupJson { compress: false }, &cfg, date(2025, 6, 14))
        .unwrap();
    let outcome = loop {
        if let Some(result) = handle.try_result() {
            break result.unwrap();
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    };
    assert!(matches!(outcome, JobOutcome::BackedUp(_)));
}

#[test]
fn test_job_runner_allows_one_job_at_a_time() {
    let db_path = setup_test_db("export_job_in_flight");
    let storage = setup_storage("export_job_in_flight");
    let cfg = test_config(&db_path, &storage);

    // hold an exclusive lock so the first job waits on the database
    let mut blocker = open_pool(&db_path);
    record(&mut blocker, 8, 14, 12.5, 1012.3, 61.0);
    blocker.conn.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let runner = JobRunner::new();
    let first = runner
        .submit(Job::ExportCsv, &cfg, date(2025, 6, 14))
        .unwrap();

    let second = runner.submit(Job::BackupJson { compress: false }, &cfg, date(2025, 6, 14));
    assert!(matches!(second, Err(AppError::JobInFlight)));

    blocker.conn.execute_batch("COMMIT;").unwrap();
    assert!(matches!(first.wait(), Ok(JobOutcome::Exported(_))));
    assert!(!runner.is_busy());
}

#[test]
fn test_job_runner_failure_releases_the_runner() {
    let db_path = setup_test_db("export_job_failure");
    let storage = setup_storage("export_job_failure");
    let cfg = test_config(&db_path, &storage.join("unmounted"));

    let runner = JobRunner::new();
    let result = runner
        .submit(Job::ExportCsv, &cfg, date(2025, 6, 14))
        .unwrap()
        .wait();

    assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
    assert!(!runner.is_busy());
}

#[test]
fn test_non_finite_rows_are_not_exported() {
    let db_path = setup_test_db("export_non_finite");
    let storage = setup_storage("export_non_finite");
    let cfg = test_config(&db_path, &storage);
    let mut pool = open_pool(&db_path);

    // a row written by an older build, straight through the gateway
    let mut row = record(&mut pool, 8, 14, 12.5, 1012.3, 61.0);
    row.hour = 9;
    row.temperature = f64::INFINITY;
    row.temp_stats.max = f64::INFINITY;
    queries::insert_row(&pool.conn, &row).unwrap();

    let err = ExportLogic::backup_json(&mut pool, &cfg, date(2025, 6, 14), false).unwrap_err();
    assert!(matches!(err, AppError::Export(_)), "{err:?}");
    let err = ExportLogic::export_csv(&mut pool, &cfg, date(2025, 6, 14)).unwrap_err();
    assert!(matches!(err, AppError::Export(_)), "{err:?}");

    let dir = cfg.export_path();
    assert!(!dir.join("06-14-weatherstation.json").exists());
    assert!(!dir.join("06-14-weatherstation.csv").exists());
}
