//! Selection log: committed operator choices and their persistence port.

pub mod model;
pub mod repository;

pub use model::{Selection, SelectionLog};
pub use repository::SelectionLogRepository;
