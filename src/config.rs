//! Configuration file for the scholarverse application.
//!
//! ```toml
//! [search]
//! engine_id = "0123456789abcdef"
//! page_size = 6
//!
//! [analysis]
//! webhook_url = "https://hook.example.com/abc"
//! timeout_seconds = 40
//! ```
//!
//! Secrets may be left out of the file and supplied through the
//! environment instead (see [`ScholarConfig::apply_env`]).

use std::path::{Path, PathBuf};

use scholar_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScholarError};

/// Environment variable holding the search provider API key.
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
/// Environment variable holding the programmable search engine id.
pub const ENV_ENGINE_ID: &str = "CSE_ID";
/// Environment variable holding the analysis webhook URL.
pub const ENV_WEBHOOK_URL: &str = "MAKE_WEBHOOK_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    /// Search provider and pagination settings.
    pub search: SearchConfig,
    /// Profile analysis webhook settings.
    pub analysis: AnalysisConfig,
}

/// Profile analysis webhook configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Webhook receiving profile + results. Empty disables analysis.
    pub webhook_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_seconds: 40,
        }
    }
}

impl ScholarConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScholarError::Config(e.to_string()))
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
            toml::to_string_pretty(self).map_err(|e| ScholarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    /// Environment secrets are applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded, or the
    /// default file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Self::default_config_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill blank secret fields from the environment.
    ///
    /// Values already present in the file win. `lookup` is injected so
    /// tests do not have to touch the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fill_blank(&mut self.search.api_key, lookup(ENV_API_KEY));
        fill_blank(&mut self.search.engine_id, lookup(ENV_ENGINE_ID));
        fill_blank(&mut self.analysis.webhook_url, lookup(ENV_WEBHOOK_URL));
    }

    /// Returns the default config file path: `~/.config/scholarverse/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("scholarverse")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("scholarverse")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/scholarverse-config/config.toml")
        }
    }
}

fn fill_blank(field: &mut String, value: Option<String>) {
    if field.trim().is_empty() {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            *field = value.trim().to_owned();
        }
    }
}
