//! Ticket domain: models and the read-only repository contract.

pub mod model;
pub mod repository;

pub use model::{Sentiment, Ticket, TicketCatalog};
pub use repository::TicketRepository;
