//! Triage queue state types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::selection::Selection;
use crate::ticket::Ticket;

/// Position of the triage queue.
///
/// `Transitioning` is held between a committed selection and the settle of the
/// card exit; any selection attempted in that window is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum QueueState {
    /// The ticket at `cursor` is presented and accepts a selection.
    Active { cursor: usize },
    /// A selection for the ticket at `cursor` was committed; waiting to settle.
    Transitioning { cursor: usize },
    /// Every ticket has been processed. Only a reset leaves this state.
    Exhausted,
}

impl QueueState {
    /// The initial state for a queue of `len` tickets.
    pub fn initial(len: usize) -> Self {
        if len == 0 {
            Self::Exhausted
        } else {
            Self::Active { cursor: 0 }
        }
    }

    /// Index of the presented ticket, if any.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::Active { cursor } | Self::Transitioning { cursor } => Some(*cursor),
            Self::Exhausted => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active { cursor } => write!(f, "active({})", cursor),
            Self::Transitioning { cursor } => write!(f, "transitioning({})", cursor),
            Self::Exhausted => f.write_str("exhausted"),
        }
    }
}

/// Why a selection attempt was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IgnoreReason {
    /// A previous selection is still settling.
    Transitioning,
    /// Nothing left to triage.
    Exhausted,
    /// The response had no tone or no text.
    EmptyResponse,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Transitioning => "previous selection is still settling",
            Self::Exhausted => "all tickets have been processed",
            Self::EmptyResponse => "response has no tone or text",
        };
        f.write_str(reason)
    }
}

/// A selection accepted by the queue, waiting to be settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The selection to record.
    pub selection: Selection,
    /// Cursor the selection was made at.
    pub cursor: usize,
    /// Queue generation at the time of the selection. A settle only applies
    /// while this is still the current generation.
    pub generation: u64,
}

/// Read-only view of the queue for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub state: QueueState,
    /// Ticket under the cursor (also while transitioning).
    pub current_ticket: Option<Ticket>,
    /// Number of tickets that have a committed selection in this pass.
    pub processed: usize,
    pub total: usize,
    /// Length of the selection log.
    pub selections: usize,
    pub generation: u64,
}
