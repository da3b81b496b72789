//! The triage queue state machine.
//!
//! `TriageQueue` is pure: it never sleeps, never touches storage and never
//! renders anything. Timing (the settle delay) and persistence are driven by
//! the caller, which makes every transition testable without a clock.

use std::collections::HashSet;

use tracing::debug;

use super::model::{IgnoreReason, QueueSnapshot, QueueState, Transition};
use crate::selection::{Selection, SelectionLog};
use crate::suggestion::SuggestedResponse;
use crate::ticket::Ticket;

/// Sequential queue over a fixed, ordered list of tickets.
///
/// # State machine
///
/// ```text
///            select              settle (more tickets)
/// Active(i) ───────▶ Transitioning(i) ───────────────▶ Active(i+1)
///                          │
///                          └──── settle (last ticket) ──▶ Exhausted
///
/// reset: any state ──▶ Active(0)   (Exhausted when the queue is empty)
/// ```
///
/// A queue built with [`resume`](Self::resume) also remembers which tickets
/// the log already answered: settling skips over them until the next reset.
///
/// Every advance and every reset bumps the queue generation. A settle that
/// carries an outdated generation is discarded, so a reset issued while a
/// selection is settling cannot be undone by the late settle.
#[derive(Debug, Clone)]
pub struct TriageQueue {
    tickets: Vec<Ticket>,
    state: QueueState,
    generation: u64,
    /// Ticket ids answered in an earlier run of the current pass.
    answered: HashSet<String>,
}

impl TriageQueue {
    /// Creates a queue positioned at the first ticket.
    pub fn new(tickets: Vec<Ticket>) -> Self {
        let state = QueueState::initial(tickets.len());
        Self {
            tickets,
            state,
            generation: 0,
            answered: HashSet::new(),
        }
    }

    /// Creates a queue positioned at the first ticket without a selection in `log`.
    ///
    /// Later advances skip every ticket `log` answered. When every ticket
    /// already has a selection the queue starts exhausted.
    pub fn resume(tickets: Vec<Ticket>, log: &SelectionLog) -> Self {
        let answered: HashSet<String> = log
            .answered_ticket_ids()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut queue = Self {
            tickets,
            state: QueueState::Exhausted,
            generation: 0,
            answered,
        };
        queue.state = queue.next_unanswered(0);
        queue
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// The ticket under the cursor, including while it is transitioning out.
    pub fn current_ticket(&self) -> Option<&Ticket> {
        self.state.cursor().and_then(|cursor| self.tickets.get(cursor))
    }

    /// Number of tickets with a committed selection in the current pass.
    ///
    /// Everything before the cursor is answered. Tickets after it count only
    /// when a resumed log already answered them.
    pub fn processed(&self) -> usize {
        let (cursor, done) = match self.state {
            QueueState::Active { cursor } => (cursor, cursor),
            QueueState::Transitioning { cursor } => (cursor, cursor + 1),
            QueueState::Exhausted => return self.tickets.len(),
        };
        let ahead = self
            .tickets
            .iter()
            .skip(cursor + 1)
            .filter(|t| self.answered.contains(t.id.as_str()))
            .count();
        done + ahead
    }

    /// First `Active` position at or after `from` whose ticket is unanswered.
    fn next_unanswered(&self, from: usize) -> QueueState {
        match self
            .tickets
            .iter()
            .skip(from)
            .position(|t| !self.answered.contains(t.id.as_str()))
        {
            Some(offset) => QueueState::Active {
                cursor: from + offset,
            },
            None => QueueState::Exhausted,
        }
    }

    /// Accepts `response` for the ticket under the cursor.
    ///
    /// Only valid in `Active`; the queue moves to `Transitioning` and the
    /// returned [`Transition`] carries the selection to record. In any other
    /// state the call is a no-op.
    pub fn select(&mut self, response: &SuggestedResponse) -> Result<Transition, IgnoreReason> {
        let cursor = match self.state {
            QueueState::Active { cursor } => cursor,
            QueueState::Transitioning { .. } => return Err(IgnoreReason::Transitioning),
            QueueState::Exhausted => return Err(IgnoreReason::Exhausted),
        };
        if response.is_blank() {
            return Err(IgnoreReason::EmptyResponse);
        }
        // Active always points inside the ticket list.
        let Some(ticket) = self.tickets.get(cursor) else {
            self.state = QueueState::Exhausted;
            return Err(IgnoreReason::Exhausted);
        };

        let selection = Selection::new(ticket.id.clone(), response);
        self.state = QueueState::Transitioning { cursor };
        debug!(cursor, ticket_id = %ticket.id, generation = self.generation, "selection accepted");

        Ok(Transition {
            selection,
            cursor,
            generation: self.generation,
        })
    }

    /// Undoes a [`select`](Self::select) whose selection could not be recorded.
    ///
    /// Returns false if the queue has moved on since the transition was issued.
    pub fn revert(&mut self, transition: &Transition) -> bool {
        if self.generation != transition.generation
            || self.state != (QueueState::Transitioning { cursor: transition.cursor })
        {
            return false;
        }
        self.state = QueueState::Active {
            cursor: transition.cursor,
        };
        debug!(cursor = transition.cursor, "selection reverted");
        true
    }

    /// Completes the transition issued at `generation`.
    ///
    /// Moves to the next ticket, or to `Exhausted` after the last one. Returns
    /// the new state, or `None` when the settle is stale (the queue was reset
    /// or already advanced) and nothing changed.
    pub fn settle(&mut self, generation: u64) -> Option<QueueState> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale settle discarded");
            return None;
        }
        let QueueState::Transitioning { cursor } = self.state else {
            return None;
        };

        self.state = self.next_unanswered(cursor + 1);
        self.generation += 1;
        debug!(state = %self.state, generation = self.generation, "queue advanced");
        Some(self.state)
    }

    /// Returns to the first ticket from any state.
    pub fn reset(&mut self) -> QueueState {
        self.answered.clear();
        self.state = QueueState::initial(self.tickets.len());
        self.generation += 1;
        debug!(state = %self.state, generation = self.generation, "queue reset");
        self.state
    }

    /// Snapshot of the queue combined with the current log length.
    pub fn snapshot(&self, selections: usize) -> QueueSnapshot {
        QueueSnapshot {
            state: self.state,
            current_ticket: self.current_ticket().cloned(),
            processed: self.processed(),
            total: self.tickets.len(),
            selections,
            generation: self.generation,
        }
    }
}
