//! Unified path management for MedChat configuration and snapshot files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/medchat/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/medchat/      # Data directory
//! └── state/                   # Store snapshots
//!     ├── chat-store.json
//!     ├── chat-settings.json
//!     └── auth-store.json
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "medchat";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for medchat_core::MedChatError {
    fn from(e: PathError) -> Self {
        medchat_core::MedChatError::config(e.to_string())
    }
}

/// Path resolution for MedChat files.
pub struct MedChatPaths;

impl MedChatPaths {
    /// Returns the configuration directory (e.g., `~/.config/medchat/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/medchat/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding store snapshots below `data_dir`.
    pub fn snapshot_dir(data_dir: &std::path::Path) -> PathBuf {
        data_dir.join("state")
    }
}
