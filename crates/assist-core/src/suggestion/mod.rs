//! Suggested responses and the provider seam.

pub mod model;
pub mod provider;

pub use model::{SuggestedResponse, TruncationPolicy};
pub use provider::SuggestionProvider;
