//! In-memory selection log repository.
//!
//! Used for ephemeral runs (`--ephemeral`) and as a test double. Nothing
//! survives the process.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use assist_core::error::Result;
use assist_core::selection::{Selection, SelectionLog, SelectionLogRepository};

#[derive(Clone, Default)]
pub struct InMemorySelectionLogRepository {
    log: Arc<Mutex<SelectionLog>>,
}

impl InMemorySelectionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing log, as if it had been persisted earlier.
    pub fn with_log(log: SelectionLog) -> Self {
        Self {
            log: Arc::new(Mutex::new(log)),
        }
    }
}

#[async_trait]
impl SelectionLogRepository for InMemorySelectionLogRepository {
    async fn load_all(&self) -> Result<SelectionLog> {
        Ok(self.log.lock().await.clone())
    }

    async fn append(&self, selection: &Selection) -> Result<()> {
        self.log.lock().await.append(selection.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.log.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_core::suggestion::SuggestedResponse;

    #[tokio::test]
    async fn test_append_and_clear() {
        let repo = InMemorySelectionLogRepository::new();
        repo.append(&Selection::new("A", &SuggestedResponse::new("direct", "x")))
            .await
            .unwrap();
        assert_eq!(repo.load_all().await.unwrap().len(), 1);

        repo.clear().await.unwrap();
        assert!(repo.load_all().await.unwrap().is_empty());
    }
}
