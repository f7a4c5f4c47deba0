use crate::cli::commands::today::print_today;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::parse_at;
use crate::core::record::{RecordLogic, RecordReport};
use crate::core::retention::RolloverOutcome;
use crate::core::sampler::SamplerStatus;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Channel, SensorReading};
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::display_units;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        temperature,
        pressure,
        humidity,
        at,
    } = cmd
    {
        let at = match at {
            Some(raw) => parse_at(raw)?,
            None => Local::now().naive_local(),
        };

        let readings: Vec<SensorReading> = [
            (Channel::Temperature, *temperature),
            (Channel::Pressure, *pressure),
            (Channel::Humidity, *humidity),
        ]
        .into_iter()
        .filter_map(|(channel, value)| value.map(|v| SensorReading::new(channel, v, at)))
        .collect();
        for reading in &readings {
            reading.check_finite()?;
        }

        let mut pool = DbPool::open(&cfg.database)?;
        let report = RecordLogic::run(&mut pool, cfg, readings)?;
        print_report(&report, cfg);

        if matches!(report.status, SamplerStatus::Written(_) | SamplerStatus::AlreadyPresent) {
            print_today(&mut pool, &report.sampler.live_values(), display_units(cfg, None, None))?;
        }
    }

    Ok(())
}

/// Human-readable outcome of one sampling cycle.
pub(crate) fn print_report(report: &RecordReport, cfg: &Config) {
    if let Some(RolloverOutcome::Shifted(shift)) = report.sampler.last_rollover() {
        info(format!(
            "New day: retention window advanced ({} rows moved, {} evicted)",
            shift.moved, shift.evicted
        ));
    }

    match &report.status {
        SamplerStatus::Written(row) => success(format!(
            "Sample recorded for {:02}:00 (day {}, slot {})",
            row.hour, row.day_of_month, row.day_slot
        )),
        SamplerStatus::AlreadyPresent => {
            info("A sample for this hour is already stored, nothing written.")
        }
        SamplerStatus::Retrying { failures, error } => warning(format!(
            "Write failed (attempt {failures}/{}): {error}",
            cfg.retry_budget
        )),
        SamplerStatus::GaveUp { failures, error } => warning(format!(
            "Sample dropped after {failures} failed attempts: {error}"
        )),
        SamplerStatus::Collecting => {
            let live = report.sampler.live_values();
            let missing: Vec<&str> = cfg
                .channels
                .iter()
                .filter(|c| live.get(**c).is_none())
                .map(|c| c.as_str())
                .collect();
            if missing.is_empty() {
                warning("Sampling round incomplete: readings are outside one round window");
            } else {
                warning(format!(
                    "Sampling round incomplete, missing: {}",
                    missing.join(", ")
                ));
            }
        }
        SamplerStatus::Finished => {}
    }
}
