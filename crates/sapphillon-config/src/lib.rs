//! User configuration for the sapphillon CLI
//!
//! The configuration file only supplies defaults for `sapphillon init`; every
//! value can be overridden on the command line. It lives at
//! `~/.config/sapphillon/sapphillon.toml` (platform config dir on Windows)
//! unless `SAPPHILLON_CONFIG` points somewhere else.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "SAPPHILLON_CONFIG";

const CONFIG_FILE_NAME: &str = "sapphillon.toml";

/// Error type for loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Default `package_id` written by `init`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    /// Default `author_id` written by `init`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Default language for `init` (`javascript` or `typescript`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        // Honor explicit override for tests / isolated runs.
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let dir = dirs::home_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(".config")
            .join("sapphillon");

        #[cfg(target_os = "windows")]
        let dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("sapphillon");

        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location; a missing file yields defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Values that are set, as `(key, value)` pairs in a fixed key order
    pub fn values(&self) -> Vec<(&'static str, &str)> {
        [
            ("package_id", &self.package_id),
            ("author_id", &self.author_id),
            ("language", &self.language),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.package_id.is_none() && self.author_id.is_none() && self.language.is_none()
    }
}
