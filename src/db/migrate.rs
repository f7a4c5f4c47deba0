use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

const LEGACY_IMPORT_VERSION: &str = "20150531_0001_import_legacy_weather_table";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Key/value metadata kept next to the data (rollover latch, ...).
fn ensure_meta_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

const CREATE_WEATHER: &str = r#"
    CREATE TABLE IF NOT EXISTS weather (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        hour         INTEGER NOT NULL CHECK (hour BETWEEN 0 AND 23),
        day_of_month INTEGER NOT NULL CHECK (day_of_month BETWEEN 1 AND 31),
        day_slot     INTEGER NOT NULL CHECK (day_slot BETWEEN 1 AND 31),
        temp         REAL NOT NULL,
        press        REAL NOT NULL,
        humid        REAL NOT NULL,
        max_temp     REAL NOT NULL,
        min_temp     REAL NOT NULL,
        avg_temp     REAL NOT NULL,
        max_press    REAL NOT NULL,
        min_press    REAL NOT NULL,
        avg_press    REAL NOT NULL,
        max_humid    REAL NOT NULL,
        min_humid    REAL NOT NULL,
        avg_humid    REAL NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_weather_slot ON weather(day_slot, id);
"#;

/// Import a database written by the original Android app, whose `weather`
/// table uses the short column codes (`ts`, `ds`, `dn`, `t`, ... `mih`, `avh`).
fn migrate_legacy_weather(conn: &Connection) -> Result<()> {
    warning("Legacy weather table detected, importing into the current schema...");

    conn.execute_batch(&format!(
        r#"
        BEGIN;

        ALTER TABLE weather RENAME TO weather_legacy;

        {CREATE_WEATHER}

        INSERT INTO weather (hour, day_of_month, day_slot, temp, press, humid,
                             max_temp, min_temp, avg_temp,
                             max_press, min_press, avg_press,
                             max_humid, min_humid, avg_humid)
        SELECT ts, ds, dn, t, p, h, mat, mit, avt, map, mip, avp, mah, mih, avh
        FROM weather_legacy
        WHERE ts BETWEEN 0 AND 23 AND ds BETWEEN 1 AND 31 AND dn BETWEEN 1 AND 31
        ORDER BY _id ASC;

        DROP TABLE weather_legacy;

        COMMIT;
        "#
    ))?;

    mark_migration(
        conn,
        LEGACY_IMPORT_VERSION,
        "Imported legacy weather table into current schema",
    )?;

    success(format!("Migration applied: {LEGACY_IMPORT_VERSION}"));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log + meta tables
    ensure_log_table(conn)?;
    ensure_meta_table(conn)?;

    // 2) Weather table: create, or import a legacy one
    if !table_exists(conn, "weather")? {
        conn.execute_batch(CREATE_WEATHER)?;
    } else if table_has_column(conn, "weather", "ts")?
        && !migration_applied(conn, LEGACY_IMPORT_VERSION)?
    {
        migrate_legacy_weather(conn)?;
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_weather_slot ON weather(day_slot, id);",
        )?;
    }

    Ok(())
}
