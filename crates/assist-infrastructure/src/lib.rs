pub mod config_service;
pub mod dto;
pub mod json_selection_log_repository;
pub mod memory_selection_log_repository;
pub mod paths;
pub mod storage;
pub mod toml_ticket_repository;

pub use crate::config_service::ConfigService;
pub use crate::json_selection_log_repository::JsonSelectionLogRepository;
pub use crate::memory_selection_log_repository::InMemorySelectionLogRepository;
pub use crate::paths::{APP_NAME, AssistPaths};
pub use crate::toml_ticket_repository::TomlTicketRepository;
