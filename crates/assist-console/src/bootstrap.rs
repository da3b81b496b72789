//! Startup wiring: configuration, CLI overrides and logging.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use assist_application::SelectionStorage;
use assist_core::config::TriageConfig;
use assist_core::suggestion::TruncationPolicy;
use assist_infrastructure::{AssistPaths, ConfigService};

use crate::Cli;

/// File name prefix of the daily rolling log.
const LOG_FILE_PREFIX: &str = "assist.log";

/// Loads `config.toml` (or `--config`) and applies the CLI overrides.
pub fn load_config(cli: &Cli) -> Result<TriageConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    };
    let config = service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;
    Ok(apply_overrides(config, cli))
}

/// Flags given on the command line win over the config file.
pub fn apply_overrides(mut config: TriageConfig, cli: &Cli) -> TriageConfig {
    if let Some(tickets) = &cli.tickets {
        config.tickets_file = Some(tickets.clone());
    }
    if let Some(seed) = cli.seed {
        config.truncation = TruncationPolicy::RandomPrefix { seed: Some(seed) };
    }
    config
}

pub fn selection_storage(cli: &Cli) -> SelectionStorage {
    if cli.ephemeral {
        SelectionStorage::Ephemeral
    } else if let Some(dir) = &cli.data_dir {
        SelectionStorage::Directory(dir.clone())
    } else {
        SelectionStorage::Default
    }
}

/// Installs the tracing subscriber writing to `{config_dir}/logs/assist.log.YYYY-MM-DD`.
///
/// The returned guard flushes buffered lines on drop and must be held for the
/// lifetime of the program.
pub fn init_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir: PathBuf = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => AssistPaths::logs_dir()?,
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}
