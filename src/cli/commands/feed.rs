use crate::cli::commands::record::print_report;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::read_feed;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use chrono::Local;
use std::fs::File;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Feed { file } = cmd {
        let now = Local::now().naive_local();
        let readings = match file {
            Some(path) => read_feed(File::open(path)?, now)?,
            None => read_feed(io::stdin().lock(), now)?,
        };

        if readings.is_empty() {
            info("No sensor events in input.");
            return Ok(());
        }

        let total = readings.len();
        let mut pool = DbPool::open(&cfg.database)?;
        let report = RecordLogic::run(&mut pool, cfg, readings)?;

        print_report(&report, cfg);
        if report.consumed < total {
            info(format!(
                "Cycle ended after {} of {} events; the rest were not sampled.",
                report.consumed, total
            ));
        }
    }

    Ok(())
}
