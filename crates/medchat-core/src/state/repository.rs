//! Snapshot repository trait.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Durable key-value store for store snapshots.
///
/// Values are JSON documents addressed by record name
/// (see [`CHAT_STORE_RECORD`](super::CHAT_STORE_RECORD) and friends).
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Loads a record. Missing or empty records yield `Ok(None)`.
    async fn load(&self, record: &str) -> Result<Option<Value>>;

    /// Replaces a record.
    async fn save(&self, record: &str, value: Value) -> Result<()>;

    /// Deletes a record. Deleting a missing record is not an error.
    async fn remove(&self, record: &str) -> Result<()>;
}

/// Loads and deserializes a record.
pub async fn load_snapshot<T: DeserializeOwned>(
    repository: &dyn SnapshotRepository,
    record: &str,
) -> Result<Option<T>> {
    match repository.load(record).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serializes and saves a record.
pub async fn save_snapshot<T: Serialize + Sync>(
    repository: &dyn SnapshotRepository,
    record: &str,
    snapshot: &T,
) -> Result<()> {
    let value = serde_json::to_value(snapshot)?;
    repository.save(record, value).await
}
