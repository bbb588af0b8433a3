use medchat_core::settings::{GenerationSettings, SettingsPatch};
use medchat_core::state::{CHAT_SETTINGS_RECORD, SnapshotRepository, load_snapshot, save_snapshot};
use medchat_core::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the generation parameters read by every `send_message`.
pub struct SettingsStore {
    snapshots: Arc<dyn SnapshotRepository>,
    settings: RwLock<GenerationSettings>,
}

impl SettingsStore {
    pub fn new(snapshots: Arc<dyn SnapshotRepository>) -> Self {
        Self {
            snapshots,
            settings: RwLock::new(GenerationSettings::default()),
        }
    }

    /// Loads the persisted record; keeps defaults when none exists.
    pub async fn restore(&self) -> Result<()> {
        if let Some(saved) =
            load_snapshot::<GenerationSettings>(self.snapshots.as_ref(), CHAT_SETTINGS_RECORD)
                .await?
        {
            *self.settings.write().await = saved;
            tracing::debug!("Restored generation settings");
        }
        Ok(())
    }

    pub async fn get(&self) -> GenerationSettings {
        self.settings.read().await.clone()
    }

    pub async fn update(&self, patch: SettingsPatch) -> GenerationSettings {
        let updated = {
            let mut settings = self.settings.write().await;
            settings.merge(patch);
            settings.clone()
        };
        self.persist(&updated).await;
        updated
    }

    pub async fn reset(&self) -> GenerationSettings {
        let defaults = GenerationSettings::default();
        *self.settings.write().await = defaults.clone();
        self.persist(&defaults).await;
        defaults
    }

    async fn persist(&self, settings: &GenerationSettings) {
        if let Err(e) =
            save_snapshot(self.snapshots.as_ref(), CHAT_SETTINGS_RECORD, settings).await
        {
            tracing::warn!("Failed to persist generation settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medchat_infrastructure::MemorySnapshotRepository;

    #[tokio::test]
    async fn test_update_merges_and_persists() {
        let repo = Arc::new(MemorySnapshotRepository::new());
        let store = SettingsStore::new(repo.clone());

        let updated = store
            .update(SettingsPatch {
                temperature: Some(0.2),
                ..Default::default()
            })
            .await;
        assert_eq!(updated.temperature, 0.2);
        assert_eq!(updated.model, GenerationSettings::default().model);

        let restored = SettingsStore::new(repo);
        restored.restore().await.unwrap();
        assert_eq!(restored.get().await.temperature, 0.2);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = SettingsStore::new(Arc::new(MemorySnapshotRepository::new()));
        store
            .update(SettingsPatch {
                debug: Some(true),
                max_tokens: Some(64),
                ..Default::default()
            })
            .await;

        assert_eq!(store.reset().await, GenerationSettings::default());
        assert_eq!(store.get().await, GenerationSettings::default());
    }
}
