//! Triage session services.

mod factory;
mod session;

pub use factory::{SelectionStorage, TriageSessionFactory};
pub use session::{SelectOutcome, SuggestionFetch, TriageSession};
