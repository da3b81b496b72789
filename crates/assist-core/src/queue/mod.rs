//! Sequential triage queue.

pub mod machine;
pub mod model;

pub use machine::TriageQueue;
pub use model::{IgnoreReason, QueueSnapshot, QueueState, Transition};
