//! Hourly write path: one new row per hour, carrying the running
//! max/min/average of the whole day so far.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{ChannelStats, DaySlot, Sample, SampleRow, round2};
use std::iter;

/// Result of a successful call to [`DayAggregator::record_sample`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// A new row was appended.
    Written(SampleRow),
    /// The slot already holds a row for this hour; nothing was written.
    AlreadyPresent,
}

/// Max, min and two-decimal mean over a non-empty set of values.
///
/// The mean is clamped into `[min, max]` so that rounding can never push it
/// outside the observed range.
pub fn running_stats(values: &[f64]) -> ChannelStats {
    if values.is_empty() {
        return ChannelStats::new(0.0, 0.0, 0.0);
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    // clamp would panic on NaN input
    ChannelStats::new(max, min, round2(mean).max(min).min(max))
}

pub struct DayAggregator;

impl DayAggregator {
    /// Append `sample` to `slot`, recomputing the day's running aggregates.
    ///
    /// Idempotent per hour: when the most recent row of the slot was taken
    /// in the same hour, returns `AlreadyPresent` and leaves the store alone.
    /// Storage failures come back as `Err` and the caller decides whether to retry.
    pub fn record_sample(
        pool: &mut DbPool,
        slot: DaySlot,
        sample: &Sample,
    ) -> AppResult<WriteOutcome> {
        if sample.hour > 23 {
            return Err(AppError::InvalidHour(sample.hour));
        }
        sample.check_finite()?;

        let history = queries::rows_by_slot(&pool.conn, slot)?;

        if let Some(last) = history.last()
            && last.hour == sample.hour
        {
            return Ok(WriteOutcome::AlreadyPresent);
        }

        let temps: Vec<f64> = history
            .iter()
            .map(|r| r.temperature)
            .chain(iter::once(sample.temperature))
            .collect();
        let presses: Vec<f64> = history
            .iter()
            .map(|r| r.pressure)
            .chain(iter::once(sample.pressure))
            .collect();
        let humids: Vec<f64> = history
            .iter()
            .map(|r| r.humidity)
            .chain(iter::once(sample.humidity))
            .collect();

        let mut row = SampleRow {
            id: 0,
            hour: sample.hour,
            day_of_month: sample.day_of_month,
            day_slot: slot.get(),
            temperature: sample.temperature,
            pressure: sample.pressure,
            humidity: sample.humidity,
            temp_stats: running_stats(&temps),
            press_stats: running_stats(&presses),
            humid_stats: running_stats(&humids),
        };

        row.id = queries::insert_row(&pool.conn, &row)?;

        Ok(WriteOutcome::Written(row))
    }
}
