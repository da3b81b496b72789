//! Domain layer for Agent Assist.
//!
//! Holds the ticket, suggestion and selection models, the pure triage queue
//! state machine, and the repository/provider traits the outer layers
//! implement.

pub mod config;
pub mod error;
pub mod queue;
pub mod selection;
pub mod suggestion;
pub mod ticket;

// Re-export common error type
pub use error::AssistError;
