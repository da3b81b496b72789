//! Selection log DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: `{ticketId, tone, text}` triples
//! - **1.1.0**: Adds optional `selectedAt` timestamp per entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use assist_core::selection::{Selection, SelectionLog};

/// Entity name used for the selection log migration path.
pub const SELECTION_LOG_ENTITY: &str = "selection_log";

// ============================================================================
// V1.0.0
// ============================================================================

/// Selection entry DTO V1.0.0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntryV1_0_0 {
    pub ticket_id: String,
    pub tone: String,
    pub text: String,
}

/// Selection log DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SelectionLogV1_0_0 {
    #[serde(default)]
    pub selections: Vec<SelectionEntryV1_0_0>,
}

// ============================================================================
// V1.1.0
// ============================================================================

/// Selection entry DTO V1.1.0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntryV1_1_0 {
    pub ticket_id: String,
    pub tone: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_at: Option<DateTime<Utc>>,
}

/// Selection log DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct SelectionLogV1_1_0 {
    #[serde(default)]
    pub selections: Vec<SelectionEntryV1_1_0>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from V1.0.0 to V1.1.0.
/// Entries written before timestamps were recorded keep `selected_at = None`.
impl MigratesTo<SelectionLogV1_1_0> for SelectionLogV1_0_0 {
    fn migrate(self) -> SelectionLogV1_1_0 {
        SelectionLogV1_1_0 {
            selections: self
                .selections
                .into_iter()
                .map(|entry| SelectionEntryV1_1_0 {
                    ticket_id: entry.ticket_id,
                    tone: entry.tone,
                    text: entry.text,
                    selected_at: None,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<SelectionEntryV1_1_0> for Selection {
    fn from(dto: SelectionEntryV1_1_0) -> Self {
        Selection {
            ticket_id: dto.ticket_id,
            tone: dto.tone,
            text: dto.text,
            selected_at: dto.selected_at,
        }
    }
}

impl From<&Selection> for SelectionEntryV1_1_0 {
    fn from(selection: &Selection) -> Self {
        SelectionEntryV1_1_0 {
            ticket_id: selection.ticket_id.clone(),
            tone: selection.tone.clone(),
            text: selection.text.clone(),
            selected_at: selection.selected_at,
        }
    }
}

/// Convert SelectionLogV1_1_0 DTO to domain model
impl IntoDomain<SelectionLog> for SelectionLogV1_1_0 {
    fn into_domain(self) -> SelectionLog {
        SelectionLog::from_selections(self.selections.into_iter().map(Into::into).collect())
    }
}

/// Convert domain model to SelectionLogV1_1_0 DTO (for version-migrate save support)
impl FromDomain<SelectionLog> for SelectionLogV1_1_0 {
    fn from_domain(log: SelectionLog) -> Self {
        SelectionLogV1_1_0 {
            selections: log.selections.iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the selection log.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds `selectedAt` with default value None
/// - V1.1.0 → SelectionLog: Converts DTO to domain model
pub fn create_selection_log_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("selection_log" => [
        SelectionLogV1_0_0,
        SelectionLogV1_1_0,
        SelectionLog
    ], save = true)
    .expect("Failed to create selection_log migrator")
}

/// Wraps the unversioned legacy slot shape (a bare array of
/// `{ticketId, tone, text}`) as a V1.0.0 document.
///
/// Any other value is returned unchanged.
pub fn normalize_legacy_selection_log(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(entries) => serde_json::json!({
            "version": "1.0.0",
            "selections": entries,
        }),
        other => other,
    }
}
