use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{Job, JobRunner};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export = cmd {
        let runner = JobRunner::new();
        runner
            .submit(Job::ExportCsv, cfg, Local::now().date_naive())?
            .wait()?;
    }

    Ok(())
}
