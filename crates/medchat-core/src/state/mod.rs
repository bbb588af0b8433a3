pub mod model;
pub mod repository;

pub use model::{AUTH_STORE_RECORD, AuthSnapshot, CHAT_SETTINGS_RECORD, CHAT_STORE_RECORD, ChatSnapshot};
pub use repository::{SnapshotRepository, load_snapshot, save_snapshot};
