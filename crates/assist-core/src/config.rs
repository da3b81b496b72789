//! Triage configuration domain model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::suggestion::TruncationPolicy;

/// Default settle delay between a committed selection and the next ticket.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Default artificial latency of the heuristic suggestion generator.
pub const DEFAULT_SUGGESTION_LATENCY_MS: u64 = 800;

/// Runtime configuration for a triage session.
///
/// Loaded from `config.toml` by the infrastructure layer; every field has a
/// default so a missing file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Delay before a committed selection settles and the queue advances.
    pub settle_delay_ms: u64,
    /// Simulated latency of suggestion generation.
    pub suggestion_latency_ms: u64,
    /// How many generated candidates are shown.
    pub truncation: TruncationPolicy,
    /// Start at the first ticket without a recorded selection instead of the
    /// first ticket.
    pub resume_from_log: bool,
    /// Optional TOML ticket dataset that replaces the embedded one.
    pub tickets_file: Option<PathBuf>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            suggestion_latency_ms: DEFAULT_SUGGESTION_LATENCY_MS,
            truncation: TruncationPolicy::Full,
            resume_from_log: true,
            tickets_file: None,
        }
    }
}

impl TriageConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn suggestion_latency(&self) -> Duration {
        Duration::from_millis(self.suggestion_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TriageConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_millis(300));
        assert_eq!(config.suggestion_latency(), Duration::from_millis(800));
        assert_eq!(config.truncation, TruncationPolicy::Full);
        assert!(config.resume_from_log);
        assert!(config.tickets_file.is_none());
    }
}
