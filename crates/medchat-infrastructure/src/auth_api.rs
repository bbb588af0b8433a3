//! REST implementation of [`AuthApi`].

use crate::dto::auth::{LoginBody, RefreshBody, RegisterBody, TokenDto, UserDto};
use crate::endpoints;
use crate::http_client::HttpClient;
use async_trait::async_trait;
use medchat_core::auth::{AuthApi, AuthTokens, Credentials, Registration, User};
use medchat_core::error::Result;

#[derive(Clone)]
pub struct RestAuthApi {
    http: HttpClient,
}

impl RestAuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens> {
        let dto: TokenDto = self
            .http
            .post_json(endpoints::AUTH_LOGIN, &LoginBody::from(credentials))
            .await?;
        Ok(dto.into())
    }

    async fn register(&self, registration: &Registration) -> Result<AuthTokens> {
        let dto: TokenDto = self
            .http
            .post_json(endpoints::AUTH_REGISTER, &RegisterBody::from(registration))
            .await?;
        Ok(dto.into())
    }

    async fn relogin(&self, refresh_token: &str) -> Result<AuthTokens> {
        let dto: TokenDto = self
            .http
            .post_json(endpoints::AUTH_RELOGIN, &RefreshBody { refresh_token })
            .await?;
        Ok(dto.into())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let dto: TokenDto = self
            .http
            .post_json(endpoints::AUTH_REFRESH, &RefreshBody { refresh_token })
            .await?;
        Ok(dto.into())
    }

    async fn logout(&self) -> Result<()> {
        self.http.post_unit(endpoints::AUTH_LOGOUT).await
    }

    async fn me(&self) -> Result<User> {
        let dto: UserDto = self.http.get(endpoints::USERS_ME).await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, request_body, serve_once, test_client};
    use medchat_core::MedChatError;
    use medchat_core::auth::TokenHandle;

    #[tokio::test]
    async fn test_login_posts_json_credentials() {
        let (base, request) = serve_once(http_response(
            200,
            r#"{"access_token":"tok","refresh_token":"ref","token_type":"bearer"}"#,
        ))
        .await;
        let api = RestAuthApi::new(test_client(&base, TokenHandle::new()));

        let tokens = api
            .login(&Credentials::new("dr@example.org", "pw"))
            .await
            .unwrap();
        assert_eq!(tokens.access_token, "tok");
        assert_eq!(tokens.refresh_token.as_deref(), Some("ref"));

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /auth/login "));
        assert_eq!(
            request_body(&raw),
            r#"{"email":"dr@example.org","password":"pw"}"#
        );
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let (base, _request) = serve_once(http_response(
            401,
            r#"{"detail":"Incorrect email or password"}"#,
        ))
        .await;
        let api = RestAuthApi::new(test_client(&base, TokenHandle::new()));

        let err = api
            .login(&Credentials::new("dr@example.org", "nope"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MedChatError::Unauthorized("Incorrect email or password".into())
        );
    }

    #[tokio::test]
    async fn test_me_uses_bearer_token() {
        let (base, request) =
            serve_once(http_response(200, r#"{"id":1,"email":"dr@example.org"}"#)).await;
        let token = TokenHandle::new();
        token.set("tok").await;
        let api = RestAuthApi::new(test_client(&base, token));

        let user = api.me().await.unwrap();
        assert_eq!(user.email, "dr@example.org");
        assert!(request.await.unwrap().to_lowercase().contains("authorization: bearer tok"));
    }
}
