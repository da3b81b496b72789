//! Error type shared by every Agent Assist crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised anywhere between the ticket store and the console.
///
/// Selections that are ignored by the queue (a re-click while transitioning,
/// an exhausted queue) are not errors and never show up here.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AssistError {
    /// A file or directory could not be read or written.
    #[error("I/O failure: {message}")]
    Io { message: String },

    /// The selection log backend rejected an operation.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Content could not be encoded or decoded.
    #[error("Could not process {format}: {message}")]
    Serialization { format: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A persisted document has a version no migration path covers.
    #[error("Schema migration failed: {0}")]
    Migration(String),

    /// Suggestion generation failed. The queue is left where it was.
    #[error("Suggestions unavailable: {message}")]
    Suggestion { message: String, retryable: bool },

    #[error("Internal failure: {0}")]
    Internal(String),
}

impl AssistError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// A suggestion failure the operator may retry.
    pub fn suggestion(message: impl Into<String>) -> Self {
        Self::Suggestion {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether the operator can simply try the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Suggestion { retryable: true, .. })
    }

    fn serialization(format: &str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            format: format.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AssistError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{} ({:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for AssistError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err)
    }
}

impl From<toml::de::Error> for AssistError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization("TOML", err)
    }
}

impl From<toml::ser::Error> for AssistError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization("TOML", err)
    }
}

impl From<version_migrate::MigrationError> for AssistError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::serialization("versioned document", err)
            }
            other => Self::Migration(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_error_is_retryable() {
        let err = AssistError::suggestion("backend timed out");
        assert!(err.is_retryable());
        assert!(!AssistError::internal("boom").is_retryable());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AssistError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion_is_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AssistError = parse.into();
        assert!(err.is_serialization());
    }
}
