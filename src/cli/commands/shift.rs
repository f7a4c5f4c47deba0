use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::retention::{Retention, RolloverOutcome};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shift { force } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        if *force {
            let report = Retention::shift_days(&mut pool)?;
            success(format!(
                "Retention window advanced: {} rows moved, {} evicted",
                report.moved, report.evicted
            ));
            return Ok(());
        }

        match Retention::rollover_if_needed(&mut pool, Local::now().date_naive())? {
            RolloverOutcome::Shifted(report) => success(format!(
                "New day: retention window advanced ({} rows moved, {} evicted)",
                report.moved, report.evicted
            )),
            RolloverOutcome::Empty => info("No samples stored, nothing to shift."),
            RolloverOutcome::SameDay => info("Latest sample is from today, nothing to shift."),
            RolloverOutcome::NotToday => {
                info("Slot 1 holds no recent sample, nothing to shift.")
            }
            RolloverOutcome::AlreadyShifted => info("Already shifted today."),
        }
    }

    Ok(())
}
