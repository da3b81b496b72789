//! Suggestion provider trait.

use async_trait::async_trait;

use super::model::SuggestedResponse;
use crate::error::Result;
use crate::ticket::Ticket;

/// Produces candidate responses for a ticket.
///
/// This is the seam where a real inference backend plugs in. Calls suspend
/// for as long as generation takes, so callers must be prepared to observe a
/// pending state. Failures are reported as
/// [`AssistError::Suggestion`](crate::error::AssistError::Suggestion) and must
/// never advance the queue.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Returns an ordered list of suggested responses for `ticket`.
    async fn suggest(&self, ticket: &Ticket) -> Result<Vec<SuggestedResponse>>;
}
