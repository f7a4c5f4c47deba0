//! Read-only views over the retention store.

use crate::core::sampler::LiveValues;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{Channel, ChannelStats, DaySlot, SampleRow};

/// Rows of one day slot, in the order they were taken.
pub fn day_series(pool: &mut DbPool, slot: DaySlot) -> AppResult<Vec<SampleRow>> {
    Ok(queries::rows_by_slot(&pool.conn, slot)?)
}

/// One summary row per recorded day, newest first.
///
/// The last row of a slot carries that day's final aggregates. Walks slots
/// from 1 upward and stops at the first empty slot.
pub fn month_overview(pool: &mut DbPool) -> AppResult<Vec<SampleRow>> {
    let mut out = Vec::new();
    for slot in DaySlot::all() {
        match queries::last_row_of_slot(&pool.conn, slot)? {
            Some(row) => out.push(row),
            None => break,
        }
    }
    Ok(out)
}

/// Today's extremes for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub max: f64,
    pub min: f64,
}

impl Extremes {
    fn from_stats(stats: &ChannelStats) -> Self {
        Self {
            max: stats.max,
            min: stats.min,
        }
    }

    fn single(value: f64) -> Self {
        Self {
            max: value,
            min: value,
        }
    }

    /// Stretch the range so it includes `live`.
    fn widen(self, live: Option<f64>) -> Self {
        match live {
            Some(v) => Self {
                max: self.max.max(v),
                min: self.min.min(v),
            },
            None => self,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodaySummary {
    pub temperature: Option<Extremes>,
    pub pressure: Option<Extremes>,
    pub humidity: Option<Extremes>,
    /// Hourly rows stored for today.
    pub samples: usize,
    pub latest: Option<SampleRow>,
}

impl TodaySummary {
    pub fn get(&self, channel: Channel) -> Option<Extremes> {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Pressure => self.pressure,
            Channel::Humidity => self.humidity,
        }
    }
}

/// Today's max/min per channel, reconciling stored aggregates with live values.
///
/// Stored extremes are widened by a live value lying outside them; with no
/// stored row for today the live values alone are used.
pub fn today_summary(pool: &mut DbPool, live: &LiveValues) -> AppResult<TodaySummary> {
    let rows = queries::rows_by_slot(&pool.conn, DaySlot::TODAY)?;

    let summary = match rows.last() {
        Some(last) => TodaySummary {
            temperature: Some(
                Extremes::from_stats(&last.temp_stats).widen(live.get(Channel::Temperature)),
            ),
            pressure: Some(
                Extremes::from_stats(&last.press_stats).widen(live.get(Channel::Pressure)),
            ),
            humidity: Some(
                Extremes::from_stats(&last.humid_stats).widen(live.get(Channel::Humidity)),
            ),
            samples: rows.len(),
            latest: Some(last.clone()),
        },
        None => TodaySummary {
            temperature: live.temperature.map(Extremes::single),
            pressure: live.pressure.map(Extremes::single),
            humidity: live.humidity.map(Extremes::single),
            samples: 0,
            latest: None,
        },
    };

    Ok(summary)
}
