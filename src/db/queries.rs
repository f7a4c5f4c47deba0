//! Persistence gateway over the `weather` and `meta` tables.
//!
//! Plain CRUD, no aggregation logic. Every function is synchronous and
//! works on whatever connection (or transaction, via deref) it is given.

use crate::models::{ChannelStats, DaySlot, SampleRow};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_ROW: &str = "SELECT id, hour, day_of_month, day_slot, temp, press, humid,
            max_temp, min_temp, avg_temp,
            max_press, min_press, avg_press,
            max_humid, min_humid, avg_humid
     FROM weather";

pub fn map_row(row: &Row) -> Result<SampleRow> {
    Ok(SampleRow {
        id: row.get("id")?,
        hour: row.get("hour")?,
        day_of_month: row.get("day_of_month")?,
        day_slot: row.get("day_slot")?,
        temperature: row.get("temp")?,
        pressure: row.get("press")?,
        humidity: row.get("humid")?,
        temp_stats: ChannelStats::new(
            row.get("max_temp")?,
            row.get("min_temp")?,
            row.get("avg_temp")?,
        ),
        press_stats: ChannelStats::new(
            row.get("max_press")?,
            row.get("min_press")?,
            row.get("avg_press")?,
        ),
        humid_stats: ChannelStats::new(
            row.get("max_humid")?,
            row.get("min_humid")?,
            row.get("avg_humid")?,
        ),
    })
}

/// Insert a row; the `id` field of `row` is ignored. Returns the new row id.
pub fn insert_row(conn: &Connection, row: &SampleRow) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO weather (hour, day_of_month, day_slot, temp, press, humid,
                              max_temp, min_temp, avg_temp,
                              max_press, min_press, avg_press,
                              max_humid, min_humid, avg_humid)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )?;
    stmt.execute(params![
        row.hour,
        row.day_of_month,
        row.day_slot,
        row.temperature,
        row.pressure,
        row.humidity,
        row.temp_stats.max,
        row.temp_stats.min,
        row.temp_stats.avg,
        row.press_stats.max,
        row.press_stats.min,
        row.press_stats.avg,
        row.humid_stats.max,
        row.humid_stats.min,
        row.humid_stats.avg,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// All rows of one slot, in insertion order.
pub fn rows_by_slot(conn: &Connection, slot: DaySlot) -> Result<Vec<SampleRow>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ROW} WHERE day_slot = ?1 ORDER BY id ASC"))?;
    let rows = stmt.query_map([slot.get()], map_row)?;
    rows.collect()
}

/// Every row of the table, in insertion order.
pub fn all_rows(conn: &Connection) -> Result<Vec<SampleRow>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ROW} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;
    rows.collect()
}

/// Most recently inserted row, if any.
pub fn last_row(conn: &Connection) -> Result<Option<SampleRow>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ROW} ORDER BY id DESC LIMIT 1"))?;
    stmt.query_row([], map_row).optional()
}

/// Last row of one slot: its running aggregates summarise that day.
pub fn last_row_of_slot(conn: &Connection, slot: DaySlot) -> Result<Option<SampleRow>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_ROW} WHERE day_slot = ?1 ORDER BY id DESC LIMIT 1"
    ))?;
    stmt.query_row([slot.get()], map_row).optional()
}

pub fn delete_slot(conn: &Connection, slot: DaySlot) -> Result<usize> {
    conn.execute("DELETE FROM weather WHERE day_slot = ?1", [slot.get()])
}

/// Move every row of slot `from` to slot `to`. Returns the number of rows moved.
pub fn reassign_slot(conn: &Connection, from: DaySlot, to: DaySlot) -> Result<usize> {
    conn.execute(
        "UPDATE weather SET day_slot = ?1 WHERE day_slot = ?2",
        params![to.get(), from.get()],
    )
}

/// Delete every row of the table.
pub fn wipe_all(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM weather", [])
}

pub fn count_rows(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM weather", [], |row| row.get(0))
}

/// Distinct slots that currently hold data, ascending.
pub fn recorded_slots(conn: &Connection) -> Result<Vec<u32>> {
    let mut stmt =
        conn.prepare_cached("SELECT DISTINCT day_slot FROM weather ORDER BY day_slot ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, u32>(0))?;
    rows.collect()
}

pub fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_meta(conn: &Connection, key: &str) -> Result<usize> {
    conn.execute("DELETE FROM meta WHERE key = ?1", [key])
}
