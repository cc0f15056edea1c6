//! Configuration management.
//!
//! Loads `scenario.toml` (or an explicit path) with defaults for every
//! field. Command-line flags override the file afterwards.

use crate::error::{Error, Result};
use crate::reveal::RevealOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "scenario.toml";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the generator backend.
    pub base_url: String,
    /// Milliseconds between revealed characters.
    pub interval_ms: u64,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Reveal `**…**` and tags atomically instead of typing them out.
    pub preserve_markup: bool,
    /// Append the failure reason to the alert shown on errors.
    pub include_error_detail: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            interval_ms: 25,
            request_timeout_secs: 60,
            preserve_markup: true,
            include_error_detail: true,
        }
    }
}

impl Config {
    /// Load a config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Pacing interval between revealed characters.
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Timeout for backend requests.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Options for the reveal engine.
    pub const fn reveal_options(&self) -> RevealOptions {
        RevealOptions {
            preserve_markup: self.preserve_markup,
        }
    }
}
