//! Configuration management for reliefdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ledger::DEFAULT_RESOURCE_STATUS;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "reliefdesk";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "desk.db";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "RELIEFDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RELIEFDESK_`, sections split on `__`)
/// 2. TOML config file at `~/.config/reliefdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Volunteer assignment configuration.
    pub assignment: AssignmentConfig,
    /// Values used when a command leaves a field out.
    pub defaults: DefaultsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/reliefdesk/desk.db`
    pub database_path: Option<PathBuf>,
}

/// Volunteer assignment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Fixed seed for the volunteer picker. Unset draws from the OS.
    pub seed: Option<u64>,
}

/// Fallback values for optional command fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Emergency type when none is given.
    pub emergency_type: String,
    /// Resource quantity when none is given.
    pub resource_quantity: String,
    /// Resource status when none is given.
    pub resource_status: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            emergency_type: "Other".to_string(),
            resource_quantity: "1".to_string(),
            resource_status: DEFAULT_RESOURCE_STATUS.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any default label is empty.
    pub fn validate(&self) -> Result<()> {
        let labels = [
            ("defaults.emergency_type", &self.defaults.emergency_type),
            ("defaults.resource_quantity", &self.defaults.resource_quantity),
            ("defaults.resource_status", &self.defaults.resource_status),
        ];
        for (key, value) in labels {
            if value.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not be empty"),
                });
            }
        }

        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.database_path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
