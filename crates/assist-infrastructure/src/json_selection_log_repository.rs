//! File-backed selection log repository.
//!
//! Persists the selection log as a versioned JSON document (the "slot") and
//! keeps an in-memory copy so reads never touch the disk.
//!
//! File location: `{data_dir}/triage_responses.json`

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use version_migrate::Migrator;

use assist_core::error::{AssistError, Result};
use assist_core::selection::{Selection, SelectionLog, SelectionLogRepository};

use crate::dto::{
    SELECTION_LOG_ENTITY, create_selection_log_migrator, normalize_legacy_selection_log,
};
use crate::paths::AssistPaths;
use crate::storage::AtomicJsonFile;

/// Selection log repository backed by a single JSON file.
///
/// The file is read once when the repository is created. Malformed content
/// (truncated, foreign-shaped, unknown version) is logged and treated as an
/// empty log. Write failures are always returned to the caller and leave the
/// cached log untouched.
#[derive(Clone)]
pub struct JsonSelectionLogRepository {
    /// Cached log, mirrors the file after every successful write.
    log: Arc<Mutex<SelectionLog>>,
    file: AtomicJsonFile,
    migrator: Arc<Migrator>,
}

impl std::fmt::Debug for JsonSelectionLogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSelectionLogRepository")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

impl JsonSelectionLogRepository {
    /// Creates a repository at the default location and restores the log.
    pub async fn new() -> Result<Self> {
        let path = AssistPaths::selection_log_file()?;
        Self::with_path(path).await
    }

    /// Creates a repository for a custom file (for testing and `--data-dir`).
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let file = AtomicJsonFile::new(path);
        let migrator = Arc::new(create_selection_log_migrator());

        let raw = {
            let file = file.clone();
            tokio::task::spawn_blocking(move || file.load_raw())
                .await
                .map_err(|e| AssistError::internal(format!("Failed to join task: {}", e)))??
        };

        let log = match raw {
            Some(content) => decode_selection_log(&migrator, &content).unwrap_or_default(),
            None => SelectionLog::default(),
        };
        debug!(path = %file.path().display(), entries = log.len(), "selection log restored");

        Ok(Self {
            log: Arc::new(Mutex::new(log)),
            file,
            migrator,
        })
    }

    async fn write(&self, log: SelectionLog) -> Result<()> {
        let serialized = self.migrator.save_domain_flat(SELECTION_LOG_ENTITY, log)?;

        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.save_str(&serialized))
            .await
            .map_err(|e| AssistError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }
}

/// Decodes persisted bytes, returning `None` for anything unusable.
fn decode_selection_log(migrator: &Migrator, content: &[u8]) -> Option<SelectionLog> {
    let value: serde_json::Value = match serde_json::from_slice(content) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Persisted selection log is not valid JSON, starting empty");
            return None;
        }
    };

    let result: std::result::Result<SelectionLog, _> =
        migrator.load_flat_from(SELECTION_LOG_ENTITY, normalize_legacy_selection_log(value));
    match result {
        Ok(log) => Some(log),
        Err(e) => {
            warn!(error = %e, "Persisted selection log could not be migrated, starting empty");
            None
        }
    }
}

#[async_trait]
impl SelectionLogRepository for JsonSelectionLogRepository {
    async fn load_all(&self) -> Result<SelectionLog> {
        Ok(self.log.lock().await.clone())
    }

    async fn append(&self, selection: &Selection) -> Result<()> {
        let mut cached = self.log.lock().await;

        let mut next = cached.clone();
        next.append(selection.clone());

        if let Err(e) = self.write(next.clone()).await {
            error!(ticket_id = %selection.ticket_id, error = %e, "Failed to persist selection");
            return Err(e);
        }

        *cached = next;
        debug!(ticket_id = %selection.ticket_id, entries = cached.len(), "selection persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut cached = self.log.lock().await;

        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| AssistError::internal(format!("Failed to join task: {}", e)))??;

        cached.clear();
        info!(path = %self.file.path().display(), "selection log cleared");
        Ok(())
    }
}
