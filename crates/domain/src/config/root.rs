use serde::{Deserialize, Serialize};
use std::fs;

use super::doh::DohConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub doh: DohConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one set here wins over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub doh: bool,
    pub doh_url: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the file at `config_path` (or the defaults) and applies `overrides`.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if overrides.doh {
            self.doh.enabled = true;
        }
        if let Some(url) = overrides.doh_url {
            self.doh.url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.doh.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
