//! Persisted store snapshots.
//!
//! Each store persists a partial view of its state under one record name.
//! Transient fields (loading flags, last error) are never part of a snapshot.

use crate::auth::{AuthTokens, User};
use crate::session::{Message, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record holding the chat cache.
pub const CHAT_STORE_RECORD: &str = "chat-store";
/// Record holding the generation settings.
pub const CHAT_SETTINGS_RECORD: &str = "chat-settings";
/// Record holding tokens and the current user.
pub const AUTH_STORE_RECORD: &str = "auth-store";

/// Persisted part of the chat store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    /// Sessions keyed by case id, most recent first.
    #[serde(default)]
    pub sessions_by_case: HashMap<String, Vec<Session>>,
    /// Messages keyed by session id, in insertion order.
    #[serde(default)]
    pub messages_by_session: HashMap<String, Vec<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_session_id: Option<String>,
}

/// Persisted part of the auth store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<AuthTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
