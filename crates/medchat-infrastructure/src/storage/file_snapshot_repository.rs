//! File-backed [`SnapshotRepository`]: one `<record>.json` per record name.

use super::atomic_json::AtomicJsonFile;
use async_trait::async_trait;
use medchat_core::error::{MedChatError, Result};
use medchat_core::state::SnapshotRepository;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    dir: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, record: &str) -> Result<AtomicJsonFile> {
        let valid = !record.is_empty()
            && record
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(MedChatError::internal(format!(
                "Invalid snapshot record name '{record}'"
            )));
        }
        Ok(AtomicJsonFile::new(self.dir.join(format!("{record}.json"))))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MedChatError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    async fn load(&self, record: &str) -> Result<Option<Value>> {
        let file = self.file_for(record)?;
        blocking(move || Ok(file.load()?)).await
    }

    async fn save(&self, record: &str, value: Value) -> Result<()> {
        let file = self.file_for(record)?;
        tracing::debug!("Saving snapshot {:?}", file.path());
        blocking(move || Ok(file.save(&value)?)).await
    }

    async fn remove(&self, record: &str) -> Result<()> {
        let file = self.file_for(record)?;
        blocking(move || Ok(file.remove()?)).await
    }
}
