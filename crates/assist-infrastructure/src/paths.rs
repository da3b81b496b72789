//! Unified path management for agent-assist files.
//!
//! All configuration, persisted selections and logs are resolved via AppPaths
//! from the version-migrate crate so every platform gets the conventional
//! location.

use std::path::{Path, PathBuf};
use thiserror::Error;
use version_migrate::AppPaths;

/// Application name used for platform directories.
pub const APP_NAME: &str = "agent-assist";

/// Raised when the platform directories cannot be determined.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no home directory to place agent-assist files under")]
    NoHomeDir,
}

impl From<PathError> for assist_core::AssistError {
    fn from(err: PathError) -> Self {
        assist_core::AssistError::config(err.to_string())
    }
}

/// Unified path management for agent-assist.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/agent-assist/          # Config directory (AppPaths default)
/// ├── config.toml                  # Triage configuration
/// └── logs/                        # Application logs
///     └── assist.log.YYYY-MM-DD
///
/// ~/.local/share/agent-assist/     # Data directory
/// └── triage_responses.json        # Persisted selection log
/// ```
pub struct AssistPaths;

impl AssistPaths {
    /// File name of the persisted selection log.
    pub const SELECTION_LOG_FILE: &'static str = "triage_responses.json";

    fn app_paths() -> AppPaths {
        AppPaths::new(APP_NAME)
    }

    /// Returns the configuration directory (e.g., `~/.config/agent-assist/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::NoHomeDir)
    }

    /// Returns the data directory (e.g., `~/.local/share/agent-assist/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::NoHomeDir)
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted selection log.
    pub fn selection_log_file() -> Result<PathBuf, PathError> {
        Ok(Self::selection_log_file_in(&Self::data_dir()?))
    }

    /// Returns the selection log path under a custom data directory.
    pub fn selection_log_file_in(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::SELECTION_LOG_FILE)
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = AssistPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = AssistPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_selection_log_file() {
        let log_file = AssistPaths::selection_log_file().unwrap();
        assert!(log_file.ends_with("triage_responses.json"));
        let data_dir = AssistPaths::data_dir().unwrap();
        assert!(log_file.starts_with(&data_dir));
    }

    #[test]
    fn test_selection_log_file_in_custom_dir() {
        let path = AssistPaths::selection_log_file_in(Path::new("/tmp/assist"));
        assert_eq!(path, PathBuf::from("/tmp/assist/triage_responses.json"));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = AssistPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
    }
}
