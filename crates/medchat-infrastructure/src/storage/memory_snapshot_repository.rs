//! In-memory [`SnapshotRepository`], used when persistence is disabled.

use async_trait::async_trait;
use medchat_core::error::Result;
use medchat_core::state::SnapshotRepository;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    records: RwLock<HashMap<String, Value>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotRepository for MemorySnapshotRepository {
    async fn load(&self, record: &str) -> Result<Option<Value>> {
        Ok(self.records.read().await.get(record).cloned())
    }

    async fn save(&self, record: &str, value: Value) -> Result<()> {
        self.records.write().await.insert(record.to_string(), value);
        Ok(())
    }

    async fn remove(&self, record: &str) -> Result<()> {
        self.records.write().await.remove(record);
        Ok(())
    }
}
