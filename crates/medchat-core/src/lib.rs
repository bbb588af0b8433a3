//! Domain layer of the MedChat client.
//!
//! Holds the entities cached on the client (sessions, messages, patients,
//! cases, users), the generation settings record, the backend contracts
//! (`ChatApi`, `AuthApi`, `PatientApi`, `CaseApi`), the snapshot persistence
//! contract, and the shared error type. Nothing in this crate performs I/O.

pub mod auth;
pub mod case;
pub mod error;
pub mod patient;
pub mod session;
pub mod settings;
pub mod state;

// Re-export common error type
pub use error::{MedChatError, Result};
