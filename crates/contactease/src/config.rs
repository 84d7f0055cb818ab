//! Configuration management for contactease.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactease";

/// Default contacts file name.
const CONTACTS_FILE_NAME: &str = "contacts.json";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "CONTACTEASE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTEASE_`, sections separated
///    by `__`, e.g. `CONTACTEASE_STORAGE__CONTACTS_PATH`)
/// 2. TOML config file at `~/.config/contactease/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the contacts file.
    /// Defaults to `~/.local/share/contactease/contacts.json`
    pub contacts_path: Option<PathBuf>,
}

/// How contacts are shown by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Sort the full listing by first then last name.
    pub sort_by_name: bool,
    /// Output format used when none is given on the command line.
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sort_by_name: true,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

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
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.contacts_path {
            if path.file_name().is_none() {
                return Err(Error::ConfigValidation {
                    message: format!("contacts_path must name a file: {}", path.display()),
                });
            }
        }
        Ok(())
    }

    /// Replace the configured contacts file, if a path is given.
    #[must_use]
    pub fn with_contacts_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.storage.contacts_path = path;
        }
        self
    }

    /// Get the contacts file path, resolving defaults if not set.
    #[must_use]
    pub fn contacts_path(&self) -> PathBuf {
        self.storage
            .contacts_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CONTACTS_FILE_NAME))
    }
}
