//! Rule-based suggestion provider.
//!
//! Derives candidate replies from the ticket's sentiment and tier, then waits
//! for a configurable latency so callers observe the same pending window a
//! real inference call would have.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use assist_core::config::TriageConfig;
use assist_core::error::{AssistError, Result};
use assist_core::suggestion::{SuggestedResponse, SuggestionProvider, TruncationPolicy};
use assist_core::ticket::Ticket;

/// Builds the full, untruncated candidate list for `ticket`.
///
/// Positive tickets get exactly an `appreciative` and an `engaging` reply.
/// Everything else gets `empathetic`, `efficient` and `friendly`, plus a
/// `direct` escalation offer when the ticket needs escalation.
pub fn candidate_responses(ticket: &Ticket) -> Vec<SuggestedResponse> {
    let name = &ticket.customer_name;

    if ticket.sentiment.is_positive() {
        return vec![
            SuggestedResponse::new(
                "appreciative",
                format!(
                    "Thank you so much for the kind words, {}! It means a lot to the whole team.",
                    name
                ),
            ),
            SuggestedResponse::new(
                "engaging",
                format!(
                    "We're thrilled to hear that, {}! Is there anything you'd love to see us build next?",
                    name
                ),
            ),
        ];
    }

    let mut candidates = vec![
        SuggestedResponse::new(
            "empathetic",
            format!(
                "I'm really sorry for the trouble, {}. I understand how disruptive this is, and I'm looking into it right now.",
                name
            ),
        ),
        SuggestedResponse::new(
            "efficient",
            format!(
                "Hi {}, thanks for the details. Here are the next steps to get this resolved quickly.",
                name
            ),
        ),
        SuggestedResponse::new(
            "friendly",
            format!(
                "Hey {}! Thanks for reaching out. Let's sort this out together.",
                name
            ),
        ),
    ];

    if ticket.needs_escalation() {
        candidates.push(SuggestedResponse::new(
            "direct",
            format!(
                "{}, this is a tier {} issue and I'm escalating it to a senior specialist now. You'll hear back from them directly.",
                name, ticket.tier
            ),
        ));
    }

    candidates
}

/// Suggestion provider backed by [`candidate_responses`].
pub struct HeuristicSuggestionProvider {
    latency: Duration,
    truncation: TruncationPolicy,
    rng: Mutex<StdRng>,
}

impl HeuristicSuggestionProvider {
    pub fn new(latency: Duration, truncation: TruncationPolicy) -> Self {
        let rng = match truncation {
            TruncationPolicy::RandomPrefix { seed: Some(seed) } => StdRng::seed_from_u64(seed),
            _ => StdRng::from_entropy(),
        };
        Self {
            latency,
            truncation,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &TriageConfig) -> Self {
        Self::new(config.suggestion_latency(), config.truncation)
    }

    fn truncate(&self, mut candidates: Vec<SuggestedResponse>) -> Result<Vec<SuggestedResponse>> {
        if let TruncationPolicy::RandomPrefix { .. } = self.truncation {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AssistError::internal("Suggestion RNG lock poisoned"))?;
            let len = rng
                .gen_range(TruncationPolicy::PREFIX_RANGE)
                .min(candidates.len());
            candidates.truncate(len);
        }
        Ok(candidates)
    }
}

#[async_trait]
impl SuggestionProvider for HeuristicSuggestionProvider {
    async fn suggest(&self, ticket: &Ticket) -> Result<Vec<SuggestedResponse>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let responses = if ticket.sentiment.is_positive() {
            candidate_responses(ticket)
        } else {
            self.truncate(candidate_responses(ticket))?
        };

        debug!(ticket_id = %ticket.id, count = responses.len(), "suggestions generated");
        Ok(responses)
    }
}
