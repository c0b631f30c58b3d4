//! Store configuration

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Default delay before a submitted checkout closes itself.
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 2500;

/// Default catalog fixture set.
pub const DEFAULT_CATALOG: &str = "team-store";

/// Errors loading store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The confirmation delay must be positive
    #[error("confirmation_delay_ms must be greater than zero")]
    ZeroConfirmationDelay,
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// How long the order confirmation stays visible, in milliseconds.
    confirmation_delay_ms: u64,

    /// Catalog fixture set name.
    catalog: String,
}

impl StoreConfig {
    /// Parse configuration from YAML, filling in defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;

        config.validate()
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.confirmation_delay_ms == 0 {
            return Err(ConfigError::ZeroConfirmationDelay);
        }

        Ok(self)
    }

    /// Delay before a submitted checkout auto-closes.
    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }

    /// Catalog fixture set name.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            confirmation_delay_ms: DEFAULT_CONFIRMATION_DELAY_MS,
            catalog: DEFAULT_CATALOG.to_string(),
        }
    }
}
