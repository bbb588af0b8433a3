//! Conversation message types.
//!
//! A message is owned by exactly one session. Messages that were produced
//! locally (the welcome message, mirrored front-end messages) carry no
//! `server_message_id` until the backend has persisted a counterpart; only
//! linked messages can receive feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the clinician.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// Like/dislike state of a message.
///
/// Stored as `Option<Reaction>` so that "liked" and "disliked" can never be
/// set at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

/// File attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single message in a session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Client-side identifier, unique within the session.
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like: Option<Reaction>,
    /// Free-text feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Star rating, 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    /// Identifier of the backend-persisted counterpart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_message_id: Option<String>,
}

impl Message {
    /// Builds a client-originated message with a fresh id and no server link.
    pub fn local(session_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            created_at: Some(Utc::now()),
            attachments: Vec::new(),
            like: None,
            feedback: None,
            stars: None,
            server_message_id: None,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_server_id(mut self, server_message_id: impl Into<String>) -> Self {
        self.server_message_id = Some(server_message_id.into());
        self
    }

    /// Whether like/dislike/feedback can be attached to this message.
    pub fn can_react(&self) -> bool {
        self.server_message_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}
