//! Chat API trait.
//!
//! Defines the backend contract the chat store depends on. The HTTP
//! implementation lives in `medchat-infrastructure`; tests provide in-memory
//! doubles.

use super::message::{Attachment, Message, Reaction};
use super::model::Session;
use crate::error::Result;
use crate::settings::GenerationSettings;
use async_trait::async_trait;

/// Everything the backend needs to answer a chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageRequest {
    pub session_id: String,
    pub case_id: String,
    pub patient_id: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub settings: GenerationSettings,
}

/// Backend operations for chat sessions and messages.
///
/// Every call either resolves with a typed payload or fails with a
/// [`MedChatError`](crate::error::MedChatError) carrying the HTTP status and
/// the backend-supplied detail message.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Lists the sessions of a case.
    async fn list_sessions(&self, patient_id: &str, case_id: &str) -> Result<Vec<Session>>;

    /// Creates a session for a case.
    async fn start_session(
        &self,
        patient_id: &str,
        case_id: &str,
        title: Option<&str>,
    ) -> Result<Session>;

    /// Lists the messages of a session, oldest first.
    async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Sends a message and returns the message the backend persisted in reply.
    async fn send_message(&self, request: &SendMessageRequest) -> Result<Message>;

    /// Sets or clears the like/dislike state of a persisted message.
    async fn set_reaction(&self, server_message_id: &str, reaction: Option<Reaction>) -> Result<()>;

    /// Replaces star rating and free-text feedback in one call.
    async fn edit_feedback(
        &self,
        server_message_id: &str,
        stars: Option<u8>,
        feedback: Option<&str>,
    ) -> Result<()>;

    /// Deletes a session and its history.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Renames a session.
    async fn rename_session(&self, session_id: &str, title: &str) -> Result<()>;
}
