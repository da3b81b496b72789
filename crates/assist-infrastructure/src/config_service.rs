//! Configuration service implementation.
//!
//! Loads the triage configuration from `~/.config/agent-assist/config.toml`.
//! A missing file means defaults; a file that exists but cannot be parsed is
//! reported rather than silently replaced.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};
use version_migrate::FromDomain;

use assist_core::config::TriageConfig;
use assist_core::error::{AssistError, Result};

use crate::dto::{TRIAGE_CONFIG_ENTITY, TriageConfigV1_0_0, create_triage_config_migrator};
use crate::paths::AssistPaths;

/// Schema version assumed for hand-written config files without a `version` key.
const DEFAULT_CONFIG_VERSION: &str = "1.0.0";

/// Configuration service that loads and caches the triage configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first successful load.
    config: Arc<RwLock<Option<TriageConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(AssistPaths::config_file()?))
    }

    /// Creates a ConfigService for a custom config file (for `--config` and testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<TriageConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| AssistError::internal("Config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| AssistError::internal("Config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Renders a configuration as TOML, suitable for writing to `config.toml`.
    pub fn render(config: &TriageConfig) -> Result<String> {
        let dto = TriageConfigV1_0_0::from_domain(config.clone());
        let mut value = toml::Value::try_from(dto)?;
        if let Some(table) = value.as_table_mut() {
            table.insert(
                "version".to_string(),
                toml::Value::String(DEFAULT_CONFIG_VERSION.to_string()),
            );
        }
        Ok(toml::to_string_pretty(&value)?)
    }

    fn load_config(path: &Path) -> Result<TriageConfig> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file found, using defaults");
                return Ok(TriageConfig::default());
            }
            Err(e) => {
                return Err(AssistError::io(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut value: toml::Value = toml::from_str(&content).map_err(|e| {
            AssistError::config(format!("Malformed config {}: {}", path.display(), e))
        })?;

        let table = value.as_table_mut().ok_or_else(|| {
            AssistError::config(format!("Config {} is not a table", path.display()))
        })?;
        table
            .entry("version")
            .or_insert_with(|| toml::Value::String(DEFAULT_CONFIG_VERSION.to_string()));

        let migrator = create_triage_config_migrator();
        let config: TriageConfig = migrator
            .load_flat_from(TRIAGE_CONFIG_ENTITY, value)
            .map_err(|e| {
                AssistError::config(format!("Invalid config {}: {}", path.display(), e))
            })?;

        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_core::suggestion::TruncationPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.get_config().unwrap();
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn test_unversioned_file_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "settle_delay_ms = 10\nresume_from_log = false\n").unwrap();

        let config = ConfigService::with_path(path).get_config().unwrap();
        assert_eq!(config.settle_delay_ms, 10);
        assert!(!config.resume_from_log);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "settle_delay_ms = = 3").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "settle_delay_ms = \"soon\"\n").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "settle_delay_ms = 10\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().unwrap().settle_delay_ms, 10);

        std::fs::write(&path, "settle_delay_ms = 20\n").unwrap();
        assert_eq!(service.get_config().unwrap().settle_delay_ms, 10);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().settle_delay_ms, 20);
    }

    #[test]
    fn test_render_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let config = TriageConfig {
            truncation: TruncationPolicy::RandomPrefix { seed: Some(42) },
            ..TriageConfig::default()
        };
        std::fs::write(&path, ConfigService::render(&config).unwrap()).unwrap();

        let loaded = ConfigService::with_path(path).get_config().unwrap();
        assert_eq!(loaded, config);
    }
}
