//! Application layer for Agent Assist.
//!
//! Coordinates the domain queue with the infrastructure repositories: the
//! heuristic suggestion provider and the triage session controller.

pub mod suggestion;
pub mod triage;

pub use suggestion::HeuristicSuggestionProvider;
pub use triage::{SelectOutcome, SelectionStorage, SuggestionFetch, TriageSession, TriageSessionFactory};
