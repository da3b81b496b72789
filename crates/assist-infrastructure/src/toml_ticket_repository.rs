//! Ticket repository backed by a TOML ticket catalog.
//!
//! The catalog is either the dataset embedded in the binary or a user supplied
//! file with the same versioned schema. It is parsed once; afterwards the
//! repository only serves reads.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use version_migrate::Migrator;

use assist_core::error::{AssistError, Result};
use assist_core::ticket::{Ticket, TicketCatalog, TicketRepository};

use crate::dto::{TICKET_CATALOG_ENTITY, create_ticket_catalog_migrator};

/// Ticket dataset shipped with the application.
const EMBEDDED_CATALOG: &str = include_str!("../data/tickets.toml");

/// Read-only ticket store over an ordered, immutable ticket list.
#[derive(Debug, Clone)]
pub struct TomlTicketRepository {
    tickets: Arc<Vec<Ticket>>,
}

impl TomlTicketRepository {
    /// Loads the embedded ticket dataset.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_CATALOG)
    }

    /// Loads a ticket dataset from a TOML file.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            AssistError::io(format!(
                "Failed to read ticket dataset {}: {}",
                path.display(),
                e
            ))
        })?;
        let repo = Self::parse(&content)?;
        debug!(path = %path.display(), tickets = repo.tickets.len(), "ticket dataset loaded");
        Ok(repo)
    }

    /// Wraps an already built ticket list.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self> {
        let catalog = TicketCatalog::new(tickets);
        catalog.validate()?;
        Ok(Self {
            tickets: Arc::new(catalog.tickets),
        })
    }

    /// Parses a versioned TOML ticket catalog.
    pub fn parse(content: &str) -> Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)?;

        let migrator: Migrator = create_ticket_catalog_migrator();
        let catalog: TicketCatalog = migrator
            .load_flat_from(TICKET_CATALOG_ENTITY, toml_value)
            .map_err(|e| AssistError::config(format!("Invalid ticket dataset: {}", e)))?;

        Self::from_tickets(catalog.tickets)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[async_trait]
impl TicketRepository for TomlTicketRepository {
    async fn list(&self) -> Result<Vec<Ticket>> {
        Ok(self.tickets.as_ref().clone())
    }

    async fn get(&self, index: usize) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(index).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_embedded_dataset() {
        let repo = TomlTicketRepository::embedded().unwrap();
        let tickets = repo.list().await.unwrap();

        assert_eq!(tickets.len(), 8);
        assert_eq!(tickets[0].id, "TCK-1001");
        assert!(tickets.iter().any(|t| t.sentiment.is_positive()));
        assert!(tickets.iter().any(|t| t.sentiment.warrants_escalation()));
    }

    #[tokio::test]
    async fn test_get_out_of_range_is_none() {
        let repo = TomlTicketRepository::embedded().unwrap();
        assert_eq!(repo.get(0).await.unwrap().unwrap().id, "TCK-1001");
        assert!(repo.get(repo.len()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tickets.toml");
        std::fs::write(
            &path,
            r#"
version = "1.0.0"

[[tickets]]
id = "X-1"
customer_name = "Edsger"
issue_summary = "GOTO considered harmful"
tier = 3
sentiment = "analytical"
emotion = "stern"
"#,
        )
        .unwrap();

        let repo = TomlTicketRepository::from_file(&path).await.unwrap();
        let tickets = repo.list().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].customer_name, "Edsger");
        assert_eq!(tickets[0].tier, 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = TomlTicketRepository::from_file(&temp_dir.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let content = r#"
version = "1.0.0"

[[tickets]]
id = "D-1"
customer_name = "One"
issue_summary = "first"
sentiment = "calm"

[[tickets]]
id = "D-1"
customer_name = "Two"
issue_summary = "second"
sentiment = "calm"
"#;
        let err = TomlTicketRepository::parse(content).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let repo = TomlTicketRepository::parse("version = \"1.0.0\"\n").unwrap();
        assert!(repo.is_empty());
    }
}
