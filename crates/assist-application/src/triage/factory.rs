//! Session wiring: picks the ticket source, the selection log backend and the
//! suggestion provider from a [`TriageConfig`].

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use assist_core::config::TriageConfig;
use assist_core::error::Result;
use assist_core::selection::SelectionLogRepository;
use assist_core::suggestion::SuggestionProvider;
use assist_core::ticket::TicketRepository;
use assist_infrastructure::{
    AssistPaths, InMemorySelectionLogRepository, JsonSelectionLogRepository, TomlTicketRepository,
};

use super::session::TriageSession;
use crate::suggestion::HeuristicSuggestionProvider;

/// Where a session keeps its selection log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionStorage {
    /// `triage_responses.json` in the platform data directory.
    #[default]
    Default,
    /// `triage_responses.json` in the given directory.
    Directory(PathBuf),
    /// Process memory only; nothing survives a restart.
    Ephemeral,
}

/// Wires a [`TriageSession`] from configuration.
///
/// Picks the ticket dataset (embedded or `tickets_file`), the selection log
/// backend and the heuristic suggestion provider.
pub struct TriageSessionFactory {
    config: TriageConfig,
}

impl TriageSessionFactory {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub async fn ticket_repository(&self) -> Result<Arc<dyn TicketRepository>> {
        let repo = match &self.config.tickets_file {
            Some(path) => TomlTicketRepository::from_file(path).await?,
            None => TomlTicketRepository::embedded()?,
        };
        Ok(Arc::new(repo))
    }

    pub async fn selection_repository(
        &self,
        storage: &SelectionStorage,
    ) -> Result<Arc<dyn SelectionLogRepository>> {
        let repo: Arc<dyn SelectionLogRepository> = match storage {
            SelectionStorage::Default => Arc::new(JsonSelectionLogRepository::new().await?),
            SelectionStorage::Directory(dir) => Arc::new(
                JsonSelectionLogRepository::with_path(AssistPaths::selection_log_file_in(dir))
                    .await?,
            ),
            SelectionStorage::Ephemeral => Arc::new(InMemorySelectionLogRepository::new()),
        };
        Ok(repo)
    }

    pub fn suggestion_provider(&self) -> Arc<dyn SuggestionProvider> {
        Arc::new(HeuristicSuggestionProvider::from_config(&self.config))
    }

    /// Creates a session backed by `storage`.
    pub async fn create(&self, storage: &SelectionStorage) -> Result<TriageSession> {
        debug!(?storage, config = ?self.config, "creating triage session");
        TriageSession::start(
            self.ticket_repository().await?,
            self.selection_repository(storage).await?,
            self.suggestion_provider(),
            &self.config,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_core::queue::QueueState;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ephemeral_session_over_embedded_tickets() {
        let factory = TriageSessionFactory::new(TriageConfig::default());
        let session = factory.create(&SelectionStorage::Ephemeral).await.unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.state, QueueState::Active { cursor: 0 });
        assert_eq!(snapshot.total, 8);
    }

    #[tokio::test]
    async fn test_tickets_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tickets.toml");
        std::fs::write(
            &path,
            r#"
version = "1.0.0"

[[tickets]]
id = "only"
customer_name = "Grace"
issue_summary = "Found a moth in the relay"
sentiment = "calm"
"#,
        )
        .unwrap();

        let factory = TriageSessionFactory::new(TriageConfig {
            tickets_file: Some(path),
            ..TriageConfig::default()
        });
        let session = factory.create(&SelectionStorage::Ephemeral).await.unwrap();
        assert_eq!(session.snapshot().await.total, 1);
    }

    #[tokio::test]
    async fn test_directory_storage_location() {
        let temp_dir = TempDir::new().unwrap();
        let factory = TriageSessionFactory::new(TriageConfig {
            settle_delay_ms: 0,
            ..TriageConfig::default()
        });
        let session = factory
            .create(&SelectionStorage::Directory(temp_dir.path().to_path_buf()))
            .await
            .unwrap();

        session
            .select_response(&assist_core::suggestion::SuggestedResponse::new("efficient", "On it."))
            .await
            .unwrap();
        assert!(temp_dir.path().join("triage_responses.json").exists());
    }
}
