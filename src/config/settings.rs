//! TOML-based configuration for sqlast.
//!
//! Example configuration:
//! ```toml
//! dialect = "sybase"
//!
//! [translation]
//! identifier_quoting = "always"
//! cycle_strategy = "drop"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::dialect::{Dialect, IdentifierQuoting};
use crate::sql::emulation::cycle::CycleStrategy;
use crate::translation::TranslateOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SQLAST_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Dialect used when the caller does not name one.
    pub dialect: Dialect,

    /// Translation policies.
    pub translation: TranslationSettings,
}

/// Translation policies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// When identifiers are quoted.
    pub identifier_quoting: IdentifierQuoting,

    /// What happens to CYCLE clauses the dialect cannot render.
    pub cycle_strategy: CycleStrategy,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SQLAST_CONFIG`
    /// 2. `./sqlast.toml`
    /// 3. `~/.config/sqlast/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("sqlast.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlast").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Translation options for `dialect`, or the configured default dialect.
    pub fn to_options(&self, dialect: Option<Dialect>) -> TranslateOptions {
        TranslateOptions::new(dialect.unwrap_or(self.dialect))
            .with_identifier_quoting(self.translation.identifier_quoting)
            .with_cycle_strategy(self.translation.cycle_strategy)
    }
}
