//! TOML settings file.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection = "estimator.db"
//!
//! [logging]
//! level = "info"
//! file = "estimator.log"
//!
//! [company]
//! name = "AZGROUP"
//! hotline = "1900.232.327"
//! email = "info@azg.com.vn"
//! website = "azg.com.vn"
//! ```
//!
//! Every table and key is optional; missing values fall back to the
//! defaults below.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use estimate_core::db::DbConfig;
use serde::Deserialize;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "estimator.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DbConfig,
    pub logging: LoggingSettings,
    pub company: CompanyInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    /// Log file to append to, in addition to the stderr console.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Printed at the top of every quote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub hotline: String,
    pub email: String,
    pub website: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "AZGROUP Urban Investment and Development Group".to_string(),
            hotline: "1900.232.327".to_string(),
            email: "info@azg.com.vn".to_string(),
            website: "azg.com.vn".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("Invalid settings file")
    }

    /// Reads settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
    /// exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// An explicit `path` that cannot be read, or any file that is not valid
    /// TOML for these settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }
}
