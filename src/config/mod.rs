//! Configuration module for sqlast.
//!
//! Handles the settings file and its lookup locations.

mod settings;

pub use settings::{Settings, SettingsError, TranslationSettings, CONFIG_ENV_VAR};
