//! Suggestion generation.

mod heuristic;

pub use heuristic::{HeuristicSuggestionProvider, candidate_responses};
