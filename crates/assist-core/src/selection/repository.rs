//! Selection log repository trait.

use async_trait::async_trait;

use super::model::{Selection, SelectionLog};
use crate::error::Result;

/// Durable mirror of the selection log.
///
/// This is a passive collaborator of the triage session: it is read once at
/// startup, written on every committed selection, and cleared on reset.
#[async_trait]
pub trait SelectionLogRepository: Send + Sync {
    /// Loads the persisted log.
    ///
    /// A missing slot yields an empty log. Malformed content also yields an
    /// empty log; only failures to reach the storage itself are errors.
    async fn load_all(&self) -> Result<SelectionLog>;

    /// Appends `selection` and persists the full ordered sequence.
    ///
    /// On error nothing is recorded, and a subsequent `load_all` returns the
    /// log as it was before the call.
    async fn append(&self, selection: &Selection) -> Result<()>;

    /// Removes the persisted slot.
    async fn clear(&self) -> Result<()>;
}
