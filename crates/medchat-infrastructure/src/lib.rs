pub mod auth_api;
pub mod case_api;
pub mod chat_api;
pub mod config_service;
pub mod dto;
pub mod endpoints;
pub mod http_client;
pub mod patient_api;
pub mod paths;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use crate::auth_api::RestAuthApi;
pub use crate::case_api::RestCaseApi;
pub use crate::chat_api::RestChatApi;
pub use crate::config_service::{AppConfig, ConfigService};
pub use crate::http_client::HttpClient;
pub use crate::patient_api::RestPatientApi;
pub use crate::storage::{FileSnapshotRepository, MemorySnapshotRepository};
