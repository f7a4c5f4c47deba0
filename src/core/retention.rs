//! 31-day rolling retention: slot 1 is today, slot 31 the oldest day kept.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::DaySlot;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

/// `meta` key holding the calendar date of the last rollover shift.
pub const LAST_SHIFT_KEY: &str = "last_shift_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftReport {
    /// Rows dropped from slot 31.
    pub evicted: usize,
    /// Rows moved one slot up.
    pub moved: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// Day changed since the last stored sample; slots were advanced.
    Shifted(ShiftReport),
    /// No data yet: nothing to roll over.
    Empty,
    /// The most recent sample belongs to today.
    SameDay,
    /// The most recent sample is not in slot 1 (already shifted, or restored data).
    NotToday,
    /// The persisted latch says today's shift already happened.
    AlreadyShifted,
}

pub struct Retention;

impl Retention {
    /// Drop slot 31 and move every other slot up by one, atomically.
    ///
    /// Slots are moved from 30 down to 1 so a row bumped to `k + 1` is never
    /// matched again by the update of slot `k + 1`.
    pub fn shift_days(pool: &mut DbPool) -> AppResult<ShiftReport> {
        let tx = pool.conn.transaction()?;
        let report = shift_in(&tx)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "shift",
            "weather",
            &format!(
                "Evicted {} rows, moved {} rows",
                report.evicted, report.moved
            ),
        );

        Ok(report)
    }

    /// Shift once per calendar-day transition.
    ///
    /// The check, the shift and the latch update run in one transaction, so a
    /// restart can neither repeat nor lose the shift.
    pub fn rollover_if_needed(pool: &mut DbPool, today: NaiveDate) -> AppResult<RolloverOutcome> {
        let today_key = today.format("%Y-%m-%d").to_string();
        let tx = pool.conn.transaction()?;

        let outcome = match queries::last_row(&tx)? {
            None => RolloverOutcome::Empty,
            Some(last) if last.day_slot != DaySlot::TODAY.get() => RolloverOutcome::NotToday,
            Some(last) if last.day_of_month == today.day() => RolloverOutcome::SameDay,
            Some(_) => {
                if queries::get_meta(&tx, LAST_SHIFT_KEY)?.as_deref() == Some(today_key.as_str()) {
                    RolloverOutcome::AlreadyShifted
                } else {
                    let report = shift_in(&tx)?;
                    queries::set_meta(&tx, LAST_SHIFT_KEY, &today_key)?;
                    RolloverOutcome::Shifted(report)
                }
            }
        };

        tx.commit()?;

        if let RolloverOutcome::Shifted(report) = outcome {
            ttlog_quiet(
                &pool.conn,
                "shift",
                &today_key,
                &format!(
                    "Day rollover: evicted {} rows, moved {} rows",
                    report.evicted, report.moved
                ),
            );
        }

        Ok(outcome)
    }

    /// Remove every row and the rollover latch.
    pub fn clear_all(pool: &mut DbPool) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;
        let removed = queries::wipe_all(&tx)?;
        queries::delete_meta(&tx, LAST_SHIFT_KEY)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "clear",
            "weather",
            &format!("Removed {removed} rows"),
        );
        Ok(removed)
    }
}

fn shift_in(conn: &Connection) -> rusqlite::Result<ShiftReport> {
    let evicted = queries::delete_slot(conn, DaySlot::OLDEST)?;

    let mut moved = 0;
    let slots: Vec<DaySlot> = DaySlot::all().collect();
    for pair in slots.windows(2).rev() {
        // pair = [k, k + 1], visited from (30, 31) down to (1, 2)
        moved += queries::reassign_slot(conn, pair[0], pair[1])?;
    }

    Ok(ShiftReport { evicted, moved })
}
