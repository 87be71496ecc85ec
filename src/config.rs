//! Configuration System
//!
//! Layered configuration for the settings store location and logging. Sources
//! are merged by the `config` crate; see [`ConfigLoader`] for precedence.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Default settings store location, relative to the workspace
pub const DEFAULT_STORE_PATH: &str = ".scoped/settings";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "json"];
const LOG_OUTPUTS: &[&str] = &["stdout", "stderr", "file"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopedConfig {
    /// Settings store configuration
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Sled store directory; relative paths resolve against the workspace
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl SettingsConfig {
    /// Store path anchored at `workspace_root` unless already absolute
    pub fn resolve_store_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Settings: {0}")]
    Settings(String),

    #[error("Logging: {0}")]
    Logging(String),
}

impl ScopedConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.settings.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Settings(
                "Store path cannot be empty".to_string(),
            ));
        }

        let logging = &self.logging;
        if !LOG_LEVELS.contains(&logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Invalid level '{}' (expected one of {})",
                logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&logging.format.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Invalid format '{}' (expected one of {})",
                logging.format,
                LOG_FORMATS.join(", ")
            )));
        }
        if !LOG_OUTPUTS.contains(&logging.output.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Invalid output '{}' (expected one of {})",
                logging.output,
                LOG_OUTPUTS.join(", ")
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
