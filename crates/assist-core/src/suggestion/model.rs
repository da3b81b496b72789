//! Suggested response models.

use serde::{Deserialize, Serialize};

/// A candidate reply to a ticket, labelled with its tone.
///
/// Suggestions are produced fresh on every visit to a ticket and are only
/// persisted as part of a [`Selection`](crate::selection::Selection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedResponse {
    /// Short tone label (e.g. "empathetic", "direct").
    pub tone: String,
    /// Response body.
    pub text: String,
}

impl SuggestedResponse {
    pub fn new(tone: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tone: tone.into(),
            text: text.into(),
        }
    }

    /// A response with an empty tone or body cannot be recorded.
    pub fn is_blank(&self) -> bool {
        self.tone.trim().is_empty() || self.text.trim().is_empty()
    }
}

/// How many of the generated candidates are handed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Return every candidate, in order.
    #[default]
    Full,
    /// Return a prefix whose length is drawn uniformly from 3..=5 and capped
    /// to the number of candidates. A fixed seed makes the draws reproducible.
    RandomPrefix {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl TruncationPolicy {
    /// Bounds of the prefix length drawn by [`TruncationPolicy::RandomPrefix`].
    pub const PREFIX_RANGE: std::ops::RangeInclusive<usize> = 3..=5;
}
