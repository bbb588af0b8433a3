//! Application layer: the stores a front end drives, and the context object
//! that wires them to the backend and to snapshot storage.

pub mod auth_store;
pub mod case_store;
pub mod chat;
pub mod context;
pub mod notification;
pub mod patient_store;
pub mod settings_store;
pub mod status;

#[cfg(test)]
mod test_support;

pub use auth_store::{AuthState, AuthStore};
pub use case_store::{CaseState, CaseStore};
pub use chat::{ChatState, ChatStore, MessageView};
pub use context::{AppContext, Backends};
pub use notification::{Notification, NotificationLevel, Notifier};
pub use patient_store::{PatientState, PatientStore};
pub use settings_store::SettingsStore;
pub use status::StoreStatus;
