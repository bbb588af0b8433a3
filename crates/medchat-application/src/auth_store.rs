use crate::notification::Notifier;
use crate::status::StoreStatus;
use medchat_core::auth::{AuthApi, AuthTokens, Credentials, Registration, TokenHandle, User};
use medchat_core::state::{AUTH_STORE_RECORD, AuthSnapshot, SnapshotRepository, load_snapshot, save_snapshot};
use medchat_core::{MedChatError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub tokens: Option<AuthTokens>,
    pub status: StoreStatus,
}

/// Session credentials of the signed-in clinician.
///
/// Every token change is mirrored into the shared [`TokenHandle`] read by
/// the HTTP client.
pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    token: TokenHandle,
    snapshots: Arc<dyn SnapshotRepository>,
    notifier: Notifier,
    state: RwLock<AuthState>,
}

impl AuthStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        token: TokenHandle,
        snapshots: Arc<dyn SnapshotRepository>,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            token,
            snapshots,
            notifier,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub async fn restore(&self) -> Result<()> {
        let Some(snapshot) =
            load_snapshot::<AuthSnapshot>(self.snapshots.as_ref(), AUTH_STORE_RECORD).await?
        else {
            return Ok(());
        };
        if let Some(tokens) = &snapshot.tokens {
            self.token.set(tokens.access_token.clone()).await;
        }
        let mut state = self.state.write().await;
        state.user = snapshot.user;
        state.tokens = snapshot.tokens;
        Ok(())
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.tokens.is_some()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.status.error.clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens> {
        let credentials = Credentials::new(email.trim(), password);
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(self
                .fail("log in", MedChatError::validation("Email and password are required"))
                .await);
        }
        self.state.write().await.status.begin();
        match self.api.login(&credentials).await {
            Ok(tokens) => {
                self.accept_tokens(tokens.clone()).await;
                tracing::info!("Logged in as {}", credentials.email);
                self.fetch_me().await;
                Ok(tokens)
            }
            Err(e) => Err(self.fail("log in", e).await),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthTokens> {
        let registration = Registration {
            email: email.trim().to_string(),
            password: password.to_string(),
            full_name: full_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        };
        if registration.email.is_empty() || registration.password.is_empty() {
            return Err(self
                .fail("register", MedChatError::validation("Email and password are required"))
                .await);
        }
        if !registration.email.contains('@') {
            return Err(self
                .fail("register", MedChatError::validation("Email address is not valid"))
                .await);
        }
        self.state.write().await.status.begin();
        match self.api.register(&registration).await {
            Ok(tokens) => {
                self.accept_tokens(tokens.clone()).await;
                tracing::info!("Registered {}", registration.email);
                self.fetch_me().await;
                Ok(tokens)
            }
            Err(e) => Err(self.fail("register", e).await),
        }
    }

    /// Re-authenticates with the stored refresh token.
    pub async fn relogin(&self) -> Result<AuthTokens> {
        let refresh = self.refresh_token("log in again").await?;
        self.state.write().await.status.begin();
        match self.api.relogin(&refresh).await {
            Ok(tokens) => {
                self.accept_tokens(tokens.clone()).await;
                self.fetch_me().await;
                Ok(tokens)
            }
            Err(e) => Err(self.fail("log in again", e).await),
        }
    }

    /// Exchanges the refresh token for a new access token. A response
    /// without a refresh token keeps the current one.
    pub async fn refresh(&self) -> Result<AuthTokens> {
        let refresh = self.refresh_token("refresh session").await?;
        self.state.write().await.status.begin();
        match self.api.refresh(&refresh).await {
            Ok(mut tokens) => {
                if tokens.refresh_token.is_none() {
                    tokens.refresh_token = Some(refresh);
                }
                self.accept_tokens(tokens.clone()).await;
                tracing::debug!("Access token refreshed");
                Ok(tokens)
            }
            Err(e) => Err(self.fail("refresh session", e).await),
        }
    }

    /// Ends the session. Local credentials are dropped even when the backend
    /// call fails.
    pub async fn logout(&self) {
        if self.token.is_set().await {
            if let Err(e) = self.api.logout().await {
                tracing::warn!("Backend logout failed, clearing local session anyway: {}", e);
            }
        }
        *self.state.write().await = AuthState::default();
        self.token.clear().await;
        if let Err(e) = self.snapshots.remove(AUTH_STORE_RECORD).await {
            tracing::warn!("Failed to remove auth snapshot: {}", e);
        }
        tracing::info!("Logged out");
    }

    /// Loads the current user. Failures are logged and swallowed.
    pub async fn fetch_me(&self) -> Option<User> {
        if !self.token.is_set().await {
            return None;
        }
        match self.api.me().await {
            Ok(user) => {
                {
                    let mut state = self.state.write().await;
                    state.user = Some(user.clone());
                    state.status.succeed();
                }
                self.persist().await;
                Some(user)
            }
            Err(e) => {
                tracing::debug!("Could not load current user: {}", e);
                self.state.write().await.status.succeed();
                None
            }
        }
    }

    async fn refresh_token(&self, action: &str) -> Result<String> {
        let stored = self
            .state
            .read()
            .await
            .tokens
            .as_ref()
            .and_then(|t| t.refresh_token.clone());
        match stored {
            Some(token) => Ok(token),
            None => Err(self
                .fail(action, MedChatError::precondition("No refresh token stored"))
                .await),
        }
    }

    async fn accept_tokens(&self, tokens: AuthTokens) {
        self.token.set(tokens.access_token.clone()).await;
        {
            let mut state = self.state.write().await;
            state.tokens = Some(tokens);
            state.status.succeed();
        }
        self.persist().await;
    }

    async fn fail(&self, action: &str, err: MedChatError) -> MedChatError {
        self.state
            .write()
            .await
            .status
            .fail(&self.notifier, action, err)
    }

    async fn persist(&self) {
        let snapshot = {
            let state = self.state.read().await;
            AuthSnapshot {
                tokens: state.tokens.clone(),
                user: state.user.clone(),
            }
        };
        if let Err(e) = save_snapshot(self.snapshots.as_ref(), AUTH_STORE_RECORD, &snapshot).await {
            tracing::warn!("Failed to persist auth state: {}", e);
        }
    }
}
