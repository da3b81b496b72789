//! Triage configuration DTOs
//!
//! ## Version History
//! - **1.0.0**: Initial schema

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use assist_core::config::{DEFAULT_SETTLE_DELAY_MS, DEFAULT_SUGGESTION_LATENCY_MS, TriageConfig};
use assist_core::suggestion::TruncationPolicy;

/// Entity name used for the configuration migration path.
pub const TRIAGE_CONFIG_ENTITY: &str = "triage_config";

/// Truncation policy DTO V1.0.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TruncationPolicyDTO {
    #[default]
    Full,
    RandomPrefix {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl From<TruncationPolicyDTO> for TruncationPolicy {
    fn from(dto: TruncationPolicyDTO) -> Self {
        match dto {
            TruncationPolicyDTO::Full => TruncationPolicy::Full,
            TruncationPolicyDTO::RandomPrefix { seed } => TruncationPolicy::RandomPrefix { seed },
        }
    }
}

impl From<TruncationPolicy> for TruncationPolicyDTO {
    fn from(policy: TruncationPolicy) -> Self {
        match policy {
            TruncationPolicy::Full => TruncationPolicyDTO::Full,
            TruncationPolicy::RandomPrefix { seed } => TruncationPolicyDTO::RandomPrefix { seed },
        }
    }
}

/// Triage configuration DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct TriageConfigV1_0_0 {
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_suggestion_latency_ms")]
    pub suggestion_latency_ms: u64,
    #[serde(default)]
    pub truncation: TruncationPolicyDTO,
    #[serde(default = "default_resume_from_log")]
    pub resume_from_log: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets_file: Option<String>,
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_suggestion_latency_ms() -> u64 {
    DEFAULT_SUGGESTION_LATENCY_MS
}

fn default_resume_from_log() -> bool {
    true
}

/// Convert TriageConfigV1_0_0 DTO to domain model
impl IntoDomain<TriageConfig> for TriageConfigV1_0_0 {
    fn into_domain(self) -> TriageConfig {
        TriageConfig {
            settle_delay_ms: self.settle_delay_ms,
            suggestion_latency_ms: self.suggestion_latency_ms,
            truncation: self.truncation.into(),
            resume_from_log: self.resume_from_log,
            tickets_file: self.tickets_file.map(PathBuf::from),
        }
    }
}

/// Convert domain model to TriageConfigV1_0_0 DTO for persistence
impl FromDomain<TriageConfig> for TriageConfigV1_0_0 {
    fn from_domain(config: TriageConfig) -> Self {
        TriageConfigV1_0_0 {
            settle_delay_ms: config.settle_delay_ms,
            suggestion_latency_ms: config.suggestion_latency_ms,
            truncation: config.truncation.into(),
            resume_from_log: config.resume_from_log,
            tickets_file: config
                .tickets_file
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

/// Creates a Migrator for the triage configuration.
pub fn create_triage_config_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("triage_config" => [
        TriageConfigV1_0_0,
        TriageConfig
    ], save = true)
    .expect("Failed to create triage_config migrator")
}
