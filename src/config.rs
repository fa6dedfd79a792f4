//! Host configuration: pipeline tuning plus search and rerank credentials.
//!
//! Loaded from TOML, with secrets overridable from the environment so they
//! never have to be written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxa_search::{CohereConfig, GoogleSearchConfig, SearchConfig};

use crate::error::{Result, VoxaError};

/// Environment variable holding the Google Custom Search API key.
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_SEARCH_API_KEY";
/// Environment variable holding the programmable search engine ID.
pub const ENV_ENGINE_ID: &str = "CSE_ID";
/// Environment variable holding the Cohere API key.
pub const ENV_COHERE_API_KEY: &str = "COHERE_API_KEY";

/// Top-level configuration file layout.
///
/// ```toml
/// [search]
/// num_scrape = 30
/// num_rerank = 5
///
/// [google]
/// engine_id = "0123456789abcdef"
///
/// [cohere]
/// model = "rerank-v3.5"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxaConfig {
    /// Pipeline tuning.
    pub search: SearchConfig,
    /// Search API credentials and endpoint.
    pub google: GoogleSearchConfig,
    /// Rerank API credentials and endpoint.
    pub cohere: CohereConfig,
}

impl VoxaConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| VoxaError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else the built-in defaults. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named or existing file cannot be
    /// read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VoxaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/voxa/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("voxa").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("voxa")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/voxa-config/config.toml")
        }
    }

    /// Override credentials from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Override credentials from `lookup`; empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_GOOGLE_API_KEY) {
            self.google.api_key = key;
        }
        if let Some(cx) = non_empty(ENV_ENGINE_ID) {
            self.google.engine_id = cx;
        }
        if let Some(key) = non_empty(ENV_COHERE_API_KEY) {
            self.cohere.api_key = key;
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`VoxaError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .and_then(|()| self.google.validate())
            .and_then(|()| self.cohere.validate())
            .map_err(|e| VoxaError::Config(e.to_string()))
    }
}
