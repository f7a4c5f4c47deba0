use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::retention::Retention;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::{self, BufRead, Write};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { force } = cmd {
        if !*force && !confirm()? {
            info("Aborted, nothing deleted.");
            return Ok(());
        }

        let mut pool = DbPool::open(&cfg.database)?;
        let removed = Retention::clear_all(&mut pool)?;
        success(format!("Removed {removed} samples."));
    }

    Ok(())
}

fn confirm() -> AppResult<bool> {
    warning("This deletes every stored sample. Continue? [y/N]");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
