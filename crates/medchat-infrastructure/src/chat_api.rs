//! REST implementation of [`ChatApi`].

use crate::dto::chat::{
    FeedbackBody, MessageDto, ReactionBody, RenameSessionBody, SendMessageBody, SessionDto,
    StartSessionBody,
};
use crate::endpoints;
use crate::http_client::HttpClient;
use async_trait::async_trait;
use medchat_core::error::Result;
use medchat_core::session::{ChatApi, Message, Reaction, SendMessageRequest, Session};

/// Chat endpoints over HTTP.
#[derive(Clone)]
pub struct RestChatApi {
    http: HttpClient,
}

impl RestChatApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatApi for RestChatApi {
    async fn list_sessions(&self, patient_id: &str, case_id: &str) -> Result<Vec<Session>> {
        let dtos: Vec<SessionDto> = self
            .http
            .get(&endpoints::case_sessions(patient_id, case_id))
            .await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_session(patient_id, case_id))
            .collect())
    }

    async fn start_session(
        &self,
        patient_id: &str,
        case_id: &str,
        title: Option<&str>,
    ) -> Result<Session> {
        let dto: SessionDto = self
            .http
            .post_json(
                &endpoints::case_sessions(patient_id, case_id),
                &StartSessionBody { title },
            )
            .await?;
        Ok(dto.into_session(patient_id, case_id))
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let dtos: Vec<MessageDto> = self
            .http
            .get(&endpoints::session_messages(session_id))
            .await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_message(session_id))
            .collect())
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<Message> {
        let dto: MessageDto = self
            .http
            .post_json(
                &endpoints::session_messages(&request.session_id),
                &SendMessageBody::from(request),
            )
            .await?;
        Ok(dto.into_message(&request.session_id))
    }

    async fn set_reaction(&self, server_message_id: &str, reaction: Option<Reaction>) -> Result<()> {
        self.http
            .put_json_unit(
                &endpoints::message_like(server_message_id),
                &ReactionBody { like: reaction },
            )
            .await
    }

    async fn edit_feedback(
        &self,
        server_message_id: &str,
        stars: Option<u8>,
        feedback: Option<&str>,
    ) -> Result<()> {
        self.http
            .put_json_unit(
                &endpoints::message_feedback(server_message_id),
                &FeedbackBody { stars, feedback },
            )
            .await
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.http.delete(&endpoints::session(session_id)).await
    }

    async fn rename_session(&self, session_id: &str, title: &str) -> Result<()> {
        self.http
            .patch_json_unit(&endpoints::session(session_id), &RenameSessionBody { title })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, request_body, serve_once, test_client};
    use medchat_core::MedChatError;
    use medchat_core::auth::TokenHandle;
    use medchat_core::settings::GenerationSettings;

    #[tokio::test]
    async fn test_list_sessions() {
        let body = r#"[{"id":"s1","patient_id":"p1","case_id":"c1","title":"Intake"},{"id":"s2"}]"#;
        let (base, request) = serve_once(http_response(200, body)).await;
        let api = RestChatApi::new(test_client(&base, TokenHandle::new()));

        let sessions = api.list_sessions("p1", "c1").await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].title.as_deref(), Some("Intake"));
        assert_eq!(sessions[1].case_id, "c1");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /patients/p1/cases/c1/sessions "));
    }

    #[tokio::test]
    async fn test_send_message_bundles_settings() {
        let reply = r#"{"id":501,"session_id":"s1","role":"assistant","content":"Noted."}"#;
        let (base, request) = serve_once(http_response(200, reply)).await;
        let api = RestChatApi::new(test_client(&base, TokenHandle::new()));

        let mut settings = GenerationSettings::default();
        settings.temperature = 0.2;
        let message = api
            .send_message(&SendMessageRequest {
                session_id: "s1".into(),
                case_id: "c1".into(),
                patient_id: "p1".into(),
                content: "hello".into(),
                attachments: Vec::new(),
                settings,
            })
            .await
            .unwrap();
        assert_eq!(message.server_message_id.as_deref(), Some("501"));

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /chat/sessions/s1/messages "));
        let sent: serde_json::Value = serde_json::from_str(request_body(&raw)).unwrap();
        assert_eq!(sent["content"], "hello");
        assert_eq!(sent["model"], "gpt-4o");
        assert!((sent["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_set_reaction_clears_with_null() {
        let (base, request) = serve_once(http_response(204, "")).await;
        let api = RestChatApi::new(test_client(&base, TokenHandle::new()));

        api.set_reaction("77", None).await.unwrap();

        let raw = request.await.unwrap();
        assert!(raw.starts_with("PUT /chat/messages/77/like "));
        assert_eq!(request_body(&raw), r#"{"like":null}"#);
    }

    #[tokio::test]
    async fn test_edit_feedback_single_call() {
        let (base, request) = serve_once(http_response(200, "{}")).await;
        let api = RestChatApi::new(test_client(&base, TokenHandle::new()));

        api.edit_feedback("77", Some(4), Some("clear answer")).await.unwrap();

        let raw = request.await.unwrap();
        assert!(raw.starts_with("PUT /chat/messages/77/feedback "));
        assert_eq!(
            request_body(&raw),
            r#"{"stars":4,"feedback":"clear answer"}"#
        );
    }

    #[tokio::test]
    async fn test_rename_failure_carries_detail() {
        let (base, _request) =
            serve_once(http_response(422, r#"{"detail":"Title too long"}"#)).await;
        let api = RestChatApi::new(test_client(&base, TokenHandle::new()));

        let err = api.rename_session("s1", "x").await.unwrap_err();
        assert_eq!(err, MedChatError::http(422, "Title too long"));
    }
}
