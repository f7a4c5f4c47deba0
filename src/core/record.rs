use crate::config::Config;
use crate::core::sampler::{SamplerSettings, SamplerStatus, SensorSampler};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::SensorReading;

/// Outcome of pushing a batch of sensor events through one sampling cycle.
pub struct RecordReport {
    pub status: SamplerStatus,
    /// Events consumed before the cycle ended.
    pub consumed: usize,
    pub sampler: SensorSampler,
}

pub struct RecordLogic;

impl RecordLogic {
    /// Feed `readings` in order until the cycle ends (written, duplicate
    /// hour, or retry budget spent) or the events run out.
    pub fn run(
        pool: &mut DbPool,
        cfg: &Config,
        readings: impl IntoIterator<Item = SensorReading>,
    ) -> AppResult<RecordReport> {
        let mut sampler = SensorSampler::new(SamplerSettings::from_config(cfg));
        let mut status = SamplerStatus::Collecting;
        let mut consumed = 0;

        for reading in readings {
            status = sampler.on_reading(pool, reading)?;
            consumed += 1;
            if status.is_terminal() {
                break;
            }
        }

        Ok(RecordReport {
            status,
            consumed,
            sampler,
        })
    }
}
