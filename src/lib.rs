//! wstation library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! sampling / aggregation / retention / export core.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Record { .. } => c::record::handle(&cli.command, cfg),
        Commands::Feed { .. } => c::feed::handle(&cli.command, cfg),
        Commands::Shift { .. } => c::shift::handle(&cli.command, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg),
        Commands::Today { .. } => c::today::handle(&cli.command, cfg),
        Commands::Export => c::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => c::backup::handle(&cli.command, cfg),
        Commands::Restore { .. } => c::restore::handle(&cli.command, cfg),
        Commands::Clear { .. } => c::clear::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `config` must stay usable when the file is broken, so it can be fixed
    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) if matches!(cli.command, Commands::Config { .. } | Commands::Init) => {
            ui::messages::warning(format!("{e}; using defaults"));
            Config::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(storage) = &cli.storage {
        cfg.storage_root = storage.clone();
    }

    dispatch(&cli, &cfg)
}
