//! Triage session controller.
//!
//! Drives a [`TriageQueue`] from operator actions: fetches suggestions for the
//! presented ticket, records selections through the injected
//! [`SelectionLogRepository`], and runs the settle continuation that advances
//! the queue once the exit delay has elapsed.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use assist_core::config::TriageConfig;
use assist_core::error::{AssistError, Result};
use assist_core::queue::{IgnoreReason, QueueSnapshot, QueueState, TriageQueue};
use assist_core::selection::{Selection, SelectionLog, SelectionLogRepository};
use assist_core::suggestion::{SuggestedResponse, SuggestionProvider};
use assist_core::ticket::TicketRepository;

/// Result of [`TriageSession::select_response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SelectOutcome {
    /// The selection was persisted; the queue is transitioning out of `cursor`.
    Committed { selection: Selection, cursor: usize },
    /// The selection was a no-op.
    Ignored { reason: IgnoreReason },
}

/// Result of [`TriageSession::suggestions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fetch", rename_all = "camelCase")]
pub enum SuggestionFetch {
    /// Suggestions for the ticket that is still presented.
    Ready {
        ticket_id: String,
        responses: Vec<SuggestedResponse>,
    },
    /// The queue moved on while the suggestions were generated; discard them.
    Stale,
    /// No ticket is accepting a selection right now.
    Unavailable { state: QueueState },
}

struct SessionState {
    queue: TriageQueue,
    log: SelectionLog,
}

struct SessionInner {
    state: Mutex<SessionState>,
    selection_repository: Arc<dyn SelectionLogRepository>,
    suggestion_provider: Arc<dyn SuggestionProvider>,
    settle_delay: Duration,
    snapshots: watch::Sender<QueueSnapshot>,
}

impl SessionInner {
    fn publish(&self, state: &SessionState) {
        self.snapshots
            .send_replace(state.queue.snapshot(state.log.len()));
    }
}

/// Single-operator triage session.
///
/// All mutations are serialized through one lock, which is held across the
/// storage write of a selection so two selections can never interleave.
/// Cloning is cheap and yields a handle to the same session.
#[derive(Clone)]
pub struct TriageSession {
    inner: Arc<SessionInner>,
}

impl TriageSession {
    /// Starts a session over the tickets of `ticket_repository`.
    ///
    /// The selection log is restored from `selection_repository`. With
    /// `resume_from_log` enabled the cursor starts at the first ticket that
    /// has no recorded selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the tickets or the selection log cannot be read.
    pub async fn start(
        ticket_repository: Arc<dyn TicketRepository>,
        selection_repository: Arc<dyn SelectionLogRepository>,
        suggestion_provider: Arc<dyn SuggestionProvider>,
        config: &TriageConfig,
    ) -> Result<Self> {
        let tickets = ticket_repository.list().await?;
        let log = selection_repository.load_all().await?;

        let queue = if config.resume_from_log {
            TriageQueue::resume(tickets, &log)
        } else {
            TriageQueue::new(tickets)
        };
        info!(
            tickets = queue.len(),
            selections = log.len(),
            state = %queue.state(),
            "triage session started"
        );

        let (snapshots, _) = watch::channel(queue.snapshot(log.len()));
        Ok(Self {
            inner: Arc::new(SessionInner {
                state: Mutex::new(SessionState { queue, log }),
                selection_repository,
                suggestion_provider,
                settle_delay: config.settle_delay(),
                snapshots,
            }),
        })
    }

    /// Generates suggestions for the presented ticket.
    ///
    /// The provider runs without holding the session lock. If the queue
    /// advanced or was reset while it ran, the result is [`SuggestionFetch::Stale`].
    ///
    /// # Errors
    ///
    /// Provider failures are returned as a retryable
    /// [`AssistError::Suggestion`]; the queue is left untouched.
    pub async fn suggestions(&self) -> Result<SuggestionFetch> {
        let (ticket, cursor, generation) = {
            let state = self.inner.state.lock().await;
            let queue_state = state.queue.state();
            let (QueueState::Active { cursor }, Some(ticket)) =
                (queue_state, state.queue.current_ticket())
            else {
                return Ok(SuggestionFetch::Unavailable { state: queue_state });
            };
            (ticket.clone(), cursor, state.queue.generation())
        };

        let responses = self
            .inner
            .suggestion_provider
            .suggest(&ticket)
            .await
            .map_err(|e| match e {
                AssistError::Suggestion { .. } => e,
                other => AssistError::suggestion(other.to_string()),
            })?;

        let state = self.inner.state.lock().await;
        if state.queue.generation() != generation
            || state.queue.state() != (QueueState::Active { cursor })
        {
            warn!(
                ticket_id = %ticket.id,
                cursor,
                generation,
                "discarding stale suggestions"
            );
            return Ok(SuggestionFetch::Stale);
        }

        Ok(SuggestionFetch::Ready {
            ticket_id: ticket.id,
            responses,
        })
    }

    /// Records `response` for the presented ticket.
    ///
    /// On success the queue enters `Transitioning` and advances after the
    /// settle delay. Selections made while transitioning or exhausted, or with
    /// an empty response, are ignored.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the selection could not be persisted. The
    /// queue stays on the same ticket and the log is unchanged.
    pub async fn select_response(&self, response: &SuggestedResponse) -> Result<SelectOutcome> {
        let mut state = self.inner.state.lock().await;

        let transition = match state.queue.select(response) {
            Ok(transition) => transition,
            Err(reason) => {
                debug!(%reason, state = %state.queue.state(), "selection ignored");
                return Ok(SelectOutcome::Ignored { reason });
            }
        };

        if let Err(e) = self
            .inner
            .selection_repository
            .append(&transition.selection)
            .await
        {
            state.queue.revert(&transition);
            error!(
                ticket_id = %transition.selection.ticket_id,
                cursor = transition.cursor,
                error = %e,
                "selection not recorded"
            );
            return Err(e);
        }

        state.log.append(transition.selection.clone());
        info!(
            ticket_id = %transition.selection.ticket_id,
            cursor = transition.cursor,
            tone = %transition.selection.tone,
            "selection committed"
        );
        self.inner.publish(&state);
        drop(state);

        self.schedule_settle(transition.generation);

        Ok(SelectOutcome::Committed {
            selection: transition.selection,
            cursor: transition.cursor,
        })
    }

    fn schedule_settle(&self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.settle_delay).await;

            let mut state = inner.state.lock().await;
            if let Some(next) = state.queue.settle(generation) {
                debug!(state = %next, generation, "selection settled");
                inner.publish(&state);
            }
        });
    }

    /// Clears the selection log and durable storage, and returns to the first ticket.
    ///
    /// A settle still pending from an earlier selection is cancelled.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the durable log could not be cleared; the
    /// session is left as it was.
    pub async fn reset(&self) -> Result<QueueState> {
        let mut state = self.inner.state.lock().await;

        self.inner.selection_repository.clear().await?;
        state.log.clear();
        let next = state.queue.reset();

        info!(state = %next, generation = state.queue.generation(), "triage session reset");
        self.inner.publish(&state);
        Ok(next)
    }

    pub async fn state(&self) -> QueueState {
        self.inner.state.lock().await.queue.state()
    }

    pub async fn snapshot(&self) -> QueueSnapshot {
        let state = self.inner.state.lock().await;
        state.queue.snapshot(state.log.len())
    }

    /// The selection log in commit order.
    pub async fn selections(&self) -> Vec<Selection> {
        self.inner.state.lock().await.log.selections.clone()
    }

    /// Subscribes to queue changes. The receiver starts with the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<QueueSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn settle_delay(&self) -> Duration {
        self.inner.settle_delay
    }
}
