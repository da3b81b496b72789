//! Ticket catalog DTOs
//!
//! ## Version History
//! - **1.0.0**: Initial schema (`[[tickets]]` tables)

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

use assist_core::ticket::{Sentiment, Ticket, TicketCatalog};

/// Entity name used for the ticket catalog migration path.
pub const TICKET_CATALOG_ENTITY: &str = "ticket_catalog";

/// Ticket DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketV1_0_0 {
    pub id: String,
    pub customer_name: String,
    pub issue_summary: String,
    #[serde(default)]
    pub tier: u32,
    pub sentiment: String,
    #[serde(default)]
    pub emotion: String,
}

impl From<TicketV1_0_0> for Ticket {
    fn from(dto: TicketV1_0_0) -> Self {
        Ticket {
            id: dto.id,
            customer_name: dto.customer_name,
            issue_summary: dto.issue_summary,
            tier: dto.tier,
            sentiment: Sentiment::new(dto.sentiment),
            emotion: dto.emotion,
        }
    }
}

/// Ticket catalog DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct TicketCatalogV1_0_0 {
    #[serde(default)]
    pub tickets: Vec<TicketV1_0_0>,
}

/// Convert TicketCatalogV1_0_0 DTO to domain model
impl IntoDomain<TicketCatalog> for TicketCatalogV1_0_0 {
    fn into_domain(self) -> TicketCatalog {
        TicketCatalog::new(self.tickets.into_iter().map(Into::into).collect())
    }
}

/// Creates a Migrator for ticket catalogs.
///
/// Catalogs are read-only, so no save path is registered.
pub fn create_ticket_catalog_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("ticket_catalog" => [TicketCatalogV1_0_0, TicketCatalog])
        .expect("Failed to create ticket_catalog migrator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_migration_v1_0_to_domain() {
        let migrator = create_ticket_catalog_migrator();
        let toml_str = r#"
version = "1.0.0"

[[tickets]]
id = "T-1"
customer_name = "Grace"
issue_summary = "Invoice charged twice"
tier = 2
sentiment = "frustrated"
emotion = "angry, impatient"

[[tickets]]
id = "T-2"
customer_name = "Linus"
issue_summary = "Love the new dashboard"
sentiment = "positive"
"#;
        let toml_value: toml::Value = toml::from_str(toml_str).unwrap();

        let catalog: TicketCatalog = migrator
            .load_flat_from(TICKET_CATALOG_ENTITY, toml_value)
            .unwrap();
        assert_eq!(catalog.tickets.len(), 2);
        assert_eq!(catalog.tickets[0].tier, 2);
        assert_eq!(catalog.tickets[1].tier, 0);
        assert!(catalog.tickets[1].sentiment.is_positive());
        assert!(catalog.tickets[1].emotion.is_empty());
    }
}
