//! Turns individual sensor events into hourly samples.
//!
//! The sampler is the context object for one sampling cycle: it owns the
//! last values seen per channel and the pending values of the current round,
//! and stops once a write succeeds or the retry budget is spent.

use crate::config::Config;
use crate::core::aggregator::{DayAggregator, WriteOutcome};
use crate::core::retention::{Retention, RolloverOutcome};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Channel, DaySlot, Sample, SampleRow, SensorReading, round2};
use chrono::{Datelike, Duration, Timelike};

#[derive(Debug, Clone)]
pub struct SamplerSettings {
    /// Channels with a sensor; missing channels are stored as 0.0.
    pub available: Vec<Channel>,
    pub retry_budget: u32,
    /// Maximum age difference between readings of the same round.
    pub round_window: Duration,
}

impl SamplerSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            available: cfg.channels.clone(),
            retry_budget: cfg.retry_budget.max(1),
            round_window: cfg.round_window(),
        }
    }
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            available: Channel::ALL.to_vec(),
            retry_budget: 20,
            round_window: Duration::seconds(60),
        }
    }
}

/// Latest normalised value per channel, whether or not it was written.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveValues {
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
}

impl LiveValues {
    pub fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Pressure => self.pressure,
            Channel::Humidity => self.humidity,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Temperature => self.temperature = Some(value),
            Channel::Pressure => self.pressure = Some(value),
            Channel::Humidity => self.humidity = Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SamplerStatus {
    /// Round not complete yet.
    Collecting,
    Written(SampleRow),
    /// This hour was already recorded.
    AlreadyPresent,
    /// The write failed; pending values were reset and the next round retries.
    Retrying { failures: u32, error: String },
    /// Retry budget exhausted; the cycle is over.
    GaveUp { failures: u32, error: String },
    /// The cycle already ended; the reading only updated the live values.
    Finished,
}

impl SamplerStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SamplerStatus::Written(_)
                | SamplerStatus::AlreadyPresent
                | SamplerStatus::GaveUp { .. }
                | SamplerStatus::Finished
        )
    }
}

pub struct SensorSampler {
    settings: SamplerSettings,
    pending: [Option<SensorReading>; 3],
    live: LiveValues,
    failures: u32,
    finished: bool,
    last_rollover: Option<RolloverOutcome>,
}

impl SensorSampler {
    pub fn new(settings: SamplerSettings) -> Self {
        Self {
            settings,
            pending: [None; 3],
            live: LiveValues::default(),
            failures: 0,
            finished: false,
            last_rollover: None,
        }
    }

    pub fn live_values(&self) -> LiveValues {
        self.live
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn last_rollover(&self) -> Option<RolloverOutcome> {
        self.last_rollover
    }

    /// Start a new sampling cycle (next scheduler tick), keeping live values.
    pub fn reset_cycle(&mut self) {
        self.pending = [None; 3];
        self.failures = 0;
        self.finished = false;
        self.last_rollover = None;
    }

    /// Feed one sensor event.
    pub fn on_reading(
        &mut self,
        pool: &mut DbPool,
        reading: SensorReading,
    ) -> AppResult<SamplerStatus> {
        reading.check_finite()?;
        let value = round2(reading.value);
        self.live.set(reading.channel, value);

        if self.finished {
            return Ok(SamplerStatus::Finished);
        }
        if !self.settings.available.contains(&reading.channel) {
            return Ok(SamplerStatus::Collecting);
        }

        self.pending[reading.channel.index()] = Some(SensorReading { value, ..reading });
        self.drop_stale(&reading);

        let Some(sample) = self.complete_round(&reading)? else {
            return Ok(SamplerStatus::Collecting);
        };

        match self.write(pool, &reading, &sample) {
            Ok(WriteOutcome::Written(row)) => {
                self.finished = true;
                Ok(SamplerStatus::Written(row))
            }
            Ok(WriteOutcome::AlreadyPresent) => {
                self.finished = true;
                Ok(SamplerStatus::AlreadyPresent)
            }
            Err(e) => {
                self.pending = [None; 3];
                self.failures += 1;
                let error = e.to_string();

                if self.failures >= self.settings.retry_budget {
                    self.finished = true;
                    ttlog_quiet(
                        &pool.conn,
                        "record_failed",
                        &format!("{:02}:00", sample.hour),
                        &format!("Gave up after {} attempts: {error}", self.failures),
                    );
                    Ok(SamplerStatus::GaveUp {
                        failures: self.failures,
                        error,
                    })
                } else {
                    Ok(SamplerStatus::Retrying {
                        failures: self.failures,
                        error,
                    })
                }
            }
        }
    }

    /// Forget pending values too old to belong to the same round as `newest`.
    fn drop_stale(&mut self, newest: &SensorReading) {
        let window = self.settings.round_window;
        for slot in self.pending.iter_mut() {
            if let Some(p) = slot
                && newest.at.signed_duration_since(p.at) > window
            {
                *slot = None;
            }
        }
    }

    fn complete_round(&self, newest: &SensorReading) -> AppResult<Option<Sample>> {
        let mut values = [0.0_f64; 3];
        for channel in &self.settings.available {
            match self.pending[channel.index()] {
                Some(r) => values[channel.index()] = r.value,
                None => return Ok(None),
            }
        }

        let at = newest.at;
        let sample = Sample::new(
            at.hour(),
            at.day(),
            values[Channel::Temperature.index()],
            values[Channel::Pressure.index()],
            values[Channel::Humidity.index()],
        )?;
        Ok(Some(sample))
    }

    fn write(
        &mut self,
        pool: &mut DbPool,
        newest: &SensorReading,
        sample: &Sample,
    ) -> AppResult<WriteOutcome> {
        self.last_rollover = Some(Retention::rollover_if_needed(pool, newest.at.date())?);
        let outcome = DayAggregator::record_sample(pool, DaySlot::TODAY, sample)?;

        if let WriteOutcome::Written(row) = &outcome {
            ttlog_quiet(
                &pool.conn,
                "record",
                &format!("{:02}:00", row.hour),
                &format!(
                    "t={} p={} h={} (day {}, slot {})",
                    row.temperature, row.pressure, row.humidity, row.day_of_month, row.day_slot
                ),
            );
        }
        Ok(outcome)
    }
}
