//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of everything written to or read
//! from disk. They are private to the infrastructure layer and handle the
//! evolution of the storage format over time.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### SelectionLog Version History
//! - **1.0.0**: `{ticketId, tone, text}` triples
//! - **1.1.0**: Added optional `selectedAt`

mod selection_log;
mod ticket_catalog;
mod triage_config;

pub use selection_log::{
    SELECTION_LOG_ENTITY, SelectionEntryV1_0_0, SelectionEntryV1_1_0,
    SelectionLogV1_0_0, SelectionLogV1_1_0, create_selection_log_migrator,
    normalize_legacy_selection_log,
};

pub use ticket_catalog::{
    TICKET_CATALOG_ENTITY, TicketCatalogV1_0_0, TicketV1_0_0, create_ticket_catalog_migrator,
};

pub use triage_config::{
    TRIAGE_CONFIG_ENTITY, TriageConfigV1_0_0, TruncationPolicyDTO, create_triage_config_migrator,
};
