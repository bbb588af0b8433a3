use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared bearer token slot.
///
/// The auth store writes it after login/refresh/logout; the HTTP client reads
/// it for every outbound request. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct TokenHandle {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, token: impl Into<String>) {
        *self.inner.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    pub async fn is_set(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
