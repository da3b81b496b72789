//! Ticket repository trait.
//!
//! Defines the read-only interface for the ticket store.

use async_trait::async_trait;

use super::model::Ticket;
use crate::error::Result;

/// An abstract, read-only source of tickets.
///
/// The sequence is loaded once; its order is the traversal order of the
/// triage queue. Implementations may be backed by an embedded dataset, a file,
/// or a remote service, but must honour the same contract.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Returns every ticket in queue order.
    async fn list(&self) -> Result<Vec<Ticket>>;

    /// Returns the ticket at `index`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Ticket))`: Ticket found
    /// - `Ok(None)`: `index` is out of range
    /// - `Err(_)`: The underlying source could not be read
    async fn get(&self, index: usize) -> Result<Option<Ticket>> {
        Ok(self.list().await?.into_iter().nth(index))
    }
}
