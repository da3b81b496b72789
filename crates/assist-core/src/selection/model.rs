//! Selection log domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::suggestion::SuggestedResponse;

/// The operator's committed choice of response for a ticket.
///
/// Entries are never mutated; the log only grows until a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// ID of the ticket the response was chosen for.
    pub ticket_id: String,
    /// Tone label of the chosen response.
    pub tone: String,
    /// Body of the chosen response.
    pub text: String,
    /// When the selection was committed. Absent for entries restored from
    /// logs written before timestamps were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_at: Option<DateTime<Utc>>,
}

impl Selection {
    /// Records `response` as chosen for `ticket_id`, stamped with the current time.
    pub fn new(ticket_id: impl Into<String>, response: &SuggestedResponse) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            tone: response.tone.clone(),
            text: response.text.clone(),
            selected_at: Some(Utc::now()),
        }
    }
}

/// Append-only, ordered sequence of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionLog {
    pub selections: Vec<Selection>,
}

impl SelectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_selections(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub fn append(&mut self, selection: Selection) {
        self.selections.push(selection);
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.selections.iter()
    }

    /// Ticket IDs that already have at least one recorded selection.
    pub fn answered_ticket_ids(&self) -> HashSet<&str> {
        self.selections.iter().map(|s| s.ticket_id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = SelectionLog::new();
        log.append(Selection::new("A", &SuggestedResponse::new("direct", "one")));
        log.append(Selection::new("B", &SuggestedResponse::new("friendly", "two")));

        let ids: Vec<_> = log.iter().map(|s| s.ticket_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_answered_ticket_ids() {
        let log = SelectionLog::from_selections(vec![
            Selection::new("A", &SuggestedResponse::new("direct", "one")),
            Selection::new("A", &SuggestedResponse::new("direct", "again")),
        ]);
        let answered = log.answered_ticket_ids();
        assert_eq!(answered.len(), 1);
        assert!(answered.contains("A"));
    }

    #[test]
    fn test_selection_without_timestamp_deserializes() {
        let json = r#"{"ticketId":"A","tone":"efficient","text":"hi"}"#;
        let selection: Selection = serde_json::from_str(json).unwrap();
        assert!(selection.selected_at.is_none());
        assert_eq!(selection.tone, "efficient");
    }
}
