use chrono::{DateTime, Utc};
use medchat_core::session::{Attachment, Message, MessageRole, Reaction};

/// Display row derived from a cached [`Message`].
///
/// There is one message list per session; front ends render these rows
/// instead of keeping a second list of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub attachments: Vec<Attachment>,
    pub like: Option<Reaction>,
    pub stars: Option<u8>,
    pub feedback: Option<String>,
    /// False until the message is linked to its backend counterpart.
    pub can_react: bool,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            role: message.role,
            content: message.content.clone(),
            created_at: message.created_at,
            attachments: message.attachments.clone(),
            like: message.like,
            stars: message.stars,
            feedback: message.feedback.clone(),
            can_react: message.can_react(),
        }
    }
}

impl MessageView {
    pub fn is_liked(&self) -> bool {
        self.like == Some(Reaction::Like)
    }

    pub fn is_disliked(&self) -> bool {
        self.like == Some(Reaction::Dislike)
    }
}
