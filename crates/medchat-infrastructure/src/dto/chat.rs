use super::{id_string, opt_id_string, opt_timestamp};
use chrono::{DateTime, Utc};
use medchat_core::session::{Attachment, Message, MessageRole, Reaction, SendMessageRequest, Session};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SessionDto {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub case_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionDto {
    /// Converts to the domain model; the owning ids fall back to the ones the
    /// request was made for when the backend omits them.
    pub fn into_session(self, patient_id: &str, case_id: &str) -> Session {
        Session {
            id: self.id,
            patient_id: self.patient_id.unwrap_or_else(|| patient_id.to_string()),
            case_id: self.case_id.unwrap_or_else(|| case_id.to_string()),
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at.or(self.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<AttachmentDto> for Attachment {
    fn from(dto: AttachmentDto) -> Self {
        Attachment {
            name: dto.name,
            mime_type: dto.mime_type,
            url: dto.url,
        }
    }
}

impl From<&Attachment> for AttachmentDto {
    fn from(a: &Attachment) -> Self {
        AttachmentDto {
            name: a.name.clone(),
            mime_type: a.mime_type.clone(),
            url: a.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub session_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
    #[serde(default)]
    pub like: Option<Reaction>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub stars: Option<u8>,
}

impl MessageDto {
    /// Server messages are linked to themselves: the backend id is both the
    /// cache id and the `server_message_id`.
    pub fn into_message(self, session_id: &str) -> Message {
        Message {
            server_message_id: Some(self.id.clone()),
            id: self.id,
            session_id: self.session_id.unwrap_or_else(|| session_id.to_string()),
            role: self.role,
            content: self.content,
            created_at: self.created_at,
            attachments: self.attachments.into_iter().map(Attachment::from).collect(),
            like: self.like,
            feedback: self.feedback,
            stars: self.stars,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageBody<'a> {
    pub content: &'a str,
    pub case_id: &'a str,
    pub patient_id: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentDto>,
    pub model_provider: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub debug: bool,
}

impl<'a> From<&'a SendMessageRequest> for SendMessageBody<'a> {
    fn from(req: &'a SendMessageRequest) -> Self {
        SendMessageBody {
            content: &req.content,
            case_id: &req.case_id,
            patient_id: &req.patient_id,
            attachments: req.attachments.iter().map(AttachmentDto::from).collect(),
            model_provider: &req.settings.model_provider,
            model: &req.settings.model,
            temperature: req.settings.temperature,
            top_p: req.settings.top_p,
            max_tokens: req.settings.max_tokens,
            debug: req.settings.debug,
        }
    }
}

/// `like` is sent explicitly as `null` to clear the reaction.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionBody {
    pub like: Option<Reaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackBody<'a> {
    pub stars: Option<u8>,
    pub feedback: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameSessionBody<'a> {
    pub title: &'a str,
}
