use super::model::{AuthTokens, Credentials, Registration, User};
use crate::error::Result;
use async_trait::async_trait;

/// Backend operations for authentication.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens>;

    async fn register(&self, registration: &Registration) -> Result<AuthTokens>;

    /// Exchanges a refresh token for a fresh token pair, re-opening the
    /// backend session.
    async fn relogin(&self, refresh_token: &str) -> Result<AuthTokens>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens>;

    async fn logout(&self) -> Result<()>;

    /// Returns the user owning the current bearer token.
    async fn me(&self) -> Result<User>;
}
