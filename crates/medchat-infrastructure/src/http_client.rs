//! Outbound HTTP client for the REST backend.
//!
//! Injects the bearer token from the shared [`TokenHandle`], encodes JSON or
//! query-string payloads, and wraps every non-2xx response into
//! [`MedChatError::Http`] carrying the status and the backend-supplied detail.

use medchat_core::auth::TokenHandle;
use medchat_core::error::{MedChatError, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Thin wrapper over `reqwest::Client` bound to one backend base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: TokenHandle,
}

impl HttpClient {
    /// Creates a client for `base_url` using `user_agent` on every request.
    pub fn new(base_url: impl Into<String>, user_agent: &str, token: TokenHandle) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| MedChatError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>, token: TokenHandle) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &TokenHandle {
        &self.token
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path).await;
        self.send(request).await
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).await.query(query);
        self.send(request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        self.send(request).await
    }

    /// POST with fields encoded in the query string and an empty body.
    pub async fn post_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.query(query);
        self.send(request).await
    }

    /// PUT with fields encoded in the query string and an empty body.
    pub async fn put_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).await.query(query);
        self.send(request).await
    }

    /// PUT with a JSON body, ignoring the response body.
    pub async fn put_json_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path).await.json(body);
        self.send_unit(request).await
    }

    /// PATCH with a JSON body, ignoring the response body.
    pub async fn patch_json_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, path).await.json(body);
        self.send_unit(request).await
    }

    /// POST without a body, ignoring the response body.
    pub async fn post_unit(&self, path: &str) -> Result<()> {
        let request = self.request(Method::POST, path).await;
        self.send_unit(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path).await;
        self.send_unit(request).await
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.token.get().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Unexpected response body ({}): {}", status, e);
            MedChatError::from(e)
        })
    }

    async fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

fn transport_error(err: reqwest::Error) -> MedChatError {
    tracing::warn!("Request failed before a response was received: {}", err);
    MedChatError::Transport(err.to_string())
}

fn status_error(status: StatusCode, body: &str) -> MedChatError {
    let detail = extract_detail(status, body);
    tracing::warn!("Backend returned {}: {}", status.as_u16(), detail);
    if status == StatusCode::UNAUTHORIZED {
        MedChatError::Unauthorized(detail)
    } else {
        MedChatError::http(status.as_u16(), detail)
    }
}

/// Extracts the human-readable reason from an error response body.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`. Anything else
/// falls back to the raw body, then to the status reason phrase.
pub fn extract_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    };

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback();
    }

    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };

    let from_value = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    };

    json.get("detail")
        .and_then(from_value)
        .or_else(|| json.get("message").and_then(from_value))
        .or_else(|| json.get("error").and_then(from_value))
        .unwrap_or_else(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, serve_once, test_client};

    #[test]
    fn test_extract_detail_string() {
        let detail = extract_detail(StatusCode::BAD_REQUEST, r#"{"detail":"Case not found"}"#);
        assert_eq!(detail, "Case not found");
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["query","title"],"msg":"field required"},{"msg":"too short"}]}"#;
        let detail = extract_detail(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(detail, "field required; too short");
    }

    #[test]
    fn test_extract_detail_message_key_and_fallbacks() {
        assert_eq!(
            extract_detail(StatusCode::CONFLICT, r#"{"message":"Duplicate"}"#),
            "Duplicate"
        );
        assert_eq!(
            extract_detail(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            extract_detail(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(
            extract_detail(StatusCode::NOT_FOUND, r#"{"other":1}"#),
            "Not Found"
        );
    }

    #[test]
    fn test_url_joining() {
        let client = test_client("http://api.local/", TokenHandle::new());
        assert_eq!(client.base_url(), "http://api.local");
        assert_eq!(client.url("/users/me"), "http://api.local/users/me");
        assert_eq!(client.url("users/me"), "http://api.local/users/me");
    }

    #[tokio::test]
    async fn test_bearer_token_is_injected() {
        let (base, request) = serve_once(http_response(200, r#"{"ok":true}"#)).await;
        let token = TokenHandle::new();
        token.set("secret-token").await;
        let client = test_client(&base, token);

        let value: Value = client.get("/users/me").await.unwrap();
        assert_eq!(value["ok"], true);

        let raw = request.await.unwrap().to_lowercase();
        assert!(raw.starts_with("get /users/me "));
        assert!(raw.contains("authorization: bearer secret-token"));
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let (base, request) = serve_once(http_response(200, "[]")).await;
        let client = test_client(&base, TokenHandle::new());

        let value: Vec<Value> = client.get("/patient/").await.unwrap();
        assert!(value.is_empty());
        assert!(!request.await.unwrap().to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_error_status_is_wrapped() {
        let (base, _request) =
            serve_once(http_response(404, r#"{"detail":"Session not found"}"#)).await;
        let client = test_client(&base, TokenHandle::new());

        let err = client.delete("/chat/sessions/s9").await.unwrap_err();
        assert_eq!(err, MedChatError::http(404, "Session not found"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_variant() {
        let (base, _request) =
            serve_once(http_response(401, r#"{"detail":"Token expired"}"#)).await;
        let client = test_client(&base, TokenHandle::new());

        let err = client.get::<Value>("/users/me").await.unwrap_err();
        assert_eq!(err, MedChatError::Unauthorized("Token expired".into()));
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_query_payload_encoding() {
        let (base, request) = serve_once(http_response(200, r#"{"id":"p1"}"#)).await;
        let client = test_client(&base, TokenHandle::new());

        let query = [("first_name", "Ada"), ("last_name", "King Lovelace")];
        let _: Value = client.post_query("/patient/", &query).await.unwrap();

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /patient/?first_name=Ada&last_name=King+Lovelace "));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_serialization_error() {
        let (base, _request) = serve_once(http_response(200, "not json")).await;
        let client = test_client(&base, TokenHandle::new());

        let err = client.get::<Value>("/users/me").await.unwrap_err();
        assert!(matches!(err, MedChatError::Serialization { .. }));
    }
}
