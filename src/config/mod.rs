use crate::errors::{AppError, AppResult};
use crate::models::{Channel, PressureUnit, TemperatureUnit};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Mount point standing in for external storage; exports fail when it is missing.
    #[serde(default = "default_storage_root")]
    pub storage_root: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_retry_budget")]
    pub retry_budget: u32,
    #[serde(default = "default_round_window_secs")]
    pub round_window_secs: u64,
    #[serde(default = "default_channels")]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub pressure_unit: PressureUnit,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_storage_root() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}
fn default_export_dir() -> String {
    "WeatherStation".to_string()
}
fn default_retry_budget() -> u32 {
    20
}
fn default_round_window_secs() -> u64 {
    60
}
fn default_channels() -> Vec<Channel> {
    Channel::ALL.to_vec()
}

/// Every key a complete configuration file carries, used by `config --check`.
pub const CONFIG_KEYS: [&str; 8] = [
    "database",
    "storage_root",
    "export_dir",
    "retry_budget",
    "round_window_secs",
    "channels",
    "temperature_unit",
    "pressure_unit",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            storage_root: default_storage_root(),
            export_dir: default_export_dir(),
            retry_budget: default_retry_budget(),
            round_window_secs: default_round_window_secs(),
            channels: default_channels(),
            temperature_unit: TemperatureUnit::default(),
            pressure_unit: PressureUnit::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("wstation")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".wstation")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("wstation.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("wstation.sqlite")
    }

    /// Directory that receives CSV exports and JSON backups.
    pub fn export_path(&self) -> PathBuf {
        Path::new(&self.storage_root).join(&self.export_dir)
    }

    pub fn round_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.round_window_secs as i64)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.retry_budget == 0 {
            return Err(AppError::Config("retry_budget must be at least 1".into()));
        }
        if self.channels.is_empty() {
            return Err(AppError::Config(
                "at least one sensor channel must be enabled".into(),
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("wstation.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
