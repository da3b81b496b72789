//! Ticket domain model.
//!
//! Tickets are the customer support records an operator triages. They are
//! immutable once loaded; the order of the loaded sequence defines the order
//! in which the queue presents them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{AssistError, Result};

/// Customer sentiment label attached to a ticket.
///
/// The label set is open (`frustrated`, `concerned`, `confused`, `positive`,
/// `calm`, `analytical`, `apologetic`, `hopeful`, ...), so this is a string
/// newtype rather than a closed enum. Comparisons ignore case and surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentiment(String);

impl Sentiment {
    pub const POSITIVE: &'static str = "positive";
    pub const FRUSTRATED: &'static str = "frustrated";
    pub const ANGRY: &'static str = "angry";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as it was loaded.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this sentiment matches `label`, ignoring case and padding.
    pub fn is(&self, label: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(label)
    }

    pub fn is_positive(&self) -> bool {
        self.is(Self::POSITIVE)
    }

    /// Frustrated or angry customers are always offered an escalation path.
    pub fn warrants_escalation(&self) -> bool {
        self.is(Self::FRUSTRATED) || self.is(Self::ANGRY)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sentiment {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A customer support ticket awaiting triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: String,
    /// Customer display name, interpolated into suggested responses.
    pub customer_name: String,
    /// Free-text summary of the customer's issue.
    pub issue_summary: String,
    /// Severity/category tier. Anything above zero is offered escalation.
    pub tier: u32,
    /// Sentiment label.
    pub sentiment: Sentiment,
    /// Free-text descriptive emotion tag(s).
    pub emotion: String,
}

impl Ticket {
    /// Whether suggestions for this ticket should include an escalation offer.
    pub fn needs_escalation(&self) -> bool {
        self.tier > 0 || self.sentiment.warrants_escalation()
    }
}

/// An ordered ticket dataset as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCatalog {
    pub tickets: Vec<Ticket>,
}

impl TicketCatalog {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    /// Rejects datasets in which two tickets share an ID.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for ticket in &self.tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(AssistError::config(format!(
                    "Duplicate ticket id '{}' in ticket dataset",
                    ticket.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(tier: u32, sentiment: &str) -> Ticket {
        Ticket {
            id: "T-1".to_string(),
            customer_name: "Ada".to_string(),
            issue_summary: "Cannot log in".to_string(),
            tier,
            sentiment: sentiment.into(),
            emotion: "annoyed".to_string(),
        }
    }

    #[test]
    fn test_sentiment_matching_ignores_case_and_padding() {
        let sentiment = Sentiment::new("  Positive ");
        assert!(sentiment.is_positive());
        assert!(!sentiment.warrants_escalation());
        assert_eq!(sentiment.as_str(), "  Positive ");
    }

    #[test]
    fn test_needs_escalation() {
        assert!(ticket(1, "calm").needs_escalation());
        assert!(ticket(0, "frustrated").needs_escalation());
        assert!(ticket(0, "ANGRY").needs_escalation());
        assert!(!ticket(0, "confused").needs_escalation());
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let catalog = TicketCatalog::new(vec![ticket(0, "calm"), ticket(1, "calm")]);
        let err = catalog.validate().unwrap_err();
        assert!(err.is_config());

        let mut unique = ticket(1, "calm");
        unique.id = "T-2".to_string();
        assert!(TicketCatalog::new(vec![ticket(0, "calm"), unique]).validate().is_ok());
    }

    #[test]
    fn test_ticket_serializes_camel_case() {
        let json = serde_json::to_value(ticket(2, "concerned")).unwrap();
        assert_eq!(json["customerName"], "Ada");
        assert_eq!(json["issueSummary"], "Cannot log in");
        assert_eq!(json["sentiment"], "concerned");
    }
}
