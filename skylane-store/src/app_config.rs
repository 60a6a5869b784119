use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::pii::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Backing file for the flight table.
    pub flight_file: PathBuf,
    /// Backing file for the reservation table.
    pub reservation_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub password: Masked<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start from the checked-in defaults
            .add_source(config::File::with_name("config/default"))
            // Layer the current environment file on top (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git (optional)
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables win, e.g. SKYLANE_ADMIN__PASSWORD
            .add_source(config::Environment::with_prefix("SKYLANE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
