//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/medchat/config.toml`,
//! applies `MEDCHAT_*` environment overrides, and falls back to defaults when
//! the file is missing.

use crate::paths::MedChatPaths;
use medchat_core::error::{MedChatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "MEDCHAT_API_URL";
pub const ENV_DATA_DIR: &str = "MEDCHAT_DATA_DIR";
pub const ENV_LOG: &str = "MEDCHAT_LOG";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, without trailing slash.
    pub api_base_url: String,
    /// Directory for store snapshots. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            user_agent: format!("medchat/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppConfig {
    /// Resolved data directory.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(MedChatPaths::data_dir()?),
        }
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self
    }

    fn validate(self) -> Result<Self> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(MedChatError::config(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        Ok(self)
    }
}

/// Loads [`AppConfig`] from disk and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses the default config path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit config path (e.g. from `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads the configuration with process environment overrides.
    pub fn load(&self) -> Result<AppConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Loads the configuration, reading environment variables through `lookup`.
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => MedChatPaths::config_file()?,
        };

        let base = Self::read_file(&path)?.unwrap_or_default();
        base.apply_overrides(lookup).validate()
    }

    fn read_file(path: &Path) -> Result<Option<AppConfig>> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(Some(config))
    }
}
