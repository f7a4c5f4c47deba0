use crate::models::{PressureUnit, TemperatureUnit};
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for wstation
/// Hourly weather logger with a 31-day rolling SQLite store
#[derive(Parser)]
#[command(
    name = "wstation",
    version = env!("CARGO_PKG_VERSION"),
    about = "A weather station logger: hourly temperature, pressure and humidity with daily aggregates over the last 31 days",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the storage root that receives exports and backups
    #[arg(global = true, long = "storage", value_name = "DIR")]
    pub storage: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", help = "Show only the most recent N rows")]
        limit: Option<usize>,
    },

    /// Record one sampling round from values given on the command line
    #[command(group(
        ArgGroup::new("values")
            .required(true)
            .multiple(true)
            .args(["temperature", "pressure", "humidity"])
    ))]
    Record {
        #[arg(long = "temp", help = "Temperature in °C")]
        temperature: Option<f64>,

        #[arg(long = "press", help = "Barometric pressure in mbar")]
        pressure: Option<f64>,

        #[arg(long = "humid", help = "Relative humidity in %")]
        humidity: Option<f64>,

        #[arg(
            long = "at",
            help = "Reading time (YYYY-MM-DDTHH:MM[:SS] or RFC 3339), default now"
        )]
        at: Option<String>,
    },

    /// Feed sensor events (`channel,value[,timestamp]` lines) through the sampler
    Feed {
        #[arg(long, value_name = "FILE", help = "Read events from FILE instead of stdin")]
        file: Option<String>,
    },

    /// Advance the retention window by one day
    Shift {
        #[arg(
            long,
            help = "Shift unconditionally instead of only on a new calendar day"
        )]
        force: bool,
    },

    /// Show stored samples
    List {
        #[arg(
            long,
            value_name = "N",
            default_value_t = 1,
            help = "Day slot to show (1 = today, 31 = oldest)"
        )]
        slot: u32,

        #[arg(long, help = "One summary row per recorded day instead of one day's hours")]
        month: bool,

        #[arg(long = "temp-unit", value_enum, help = "Temperature display unit")]
        temp_unit: Option<TemperatureUnit>,

        #[arg(long = "press-unit", value_enum, help = "Pressure display unit")]
        press_unit: Option<PressureUnit>,
    },

    /// Today's extremes, latest sample and forecast
    Today {
        #[arg(long = "temp-unit", value_enum, help = "Temperature display unit")]
        temp_unit: Option<TemperatureUnit>,

        #[arg(long = "press-unit", value_enum, help = "Pressure display unit")]
        press_unit: Option<PressureUnit>,
    },

    /// Export every stored row as CSV into the export directory
    Export,

    /// Back up every stored row as JSON into the export directory
    Backup {
        #[arg(long, help = "Package the backup as a zip archive")]
        compress: bool,

        #[arg(long, help = "List available backups instead of creating one")]
        list: bool,
    },

    /// Replace the stored data with a JSON (or zipped JSON) backup
    #[command(group(ArgGroup::new("source").required(true).args(["file", "latest"])))]
    Restore {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, help = "Restore the most recent backup in the export directory")]
        latest: bool,
    },

    /// Delete every stored sample
    Clear {
        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },
}
