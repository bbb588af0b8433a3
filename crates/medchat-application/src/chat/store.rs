use super::view::MessageView;
use crate::notification::Notifier;
use crate::settings_store::SettingsStore;
use crate::status::StoreStatus;
use medchat_core::session::{
    Attachment, ChatApi, FeedbackOutcome, FeedbackSubmission, Message, MessageRole, Reaction,
    SendMessageRequest, Session, toggle_reaction,
};
use medchat_core::state::{
    CHAT_STORE_RECORD, ChatSnapshot, SnapshotRepository, load_snapshot, save_snapshot,
};
use medchat_core::{MedChatError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the chat store caches.
///
/// Lists are replaced as whole values on every mutation, so a clone taken
/// under the read lock is always a consistent view.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub sessions_by_case: HashMap<String, Vec<Session>>,
    pub messages_by_session: HashMap<String, Vec<Message>>,
    pub current_session_id: Option<String>,
    pub status: StoreStatus,
}

impl ChatState {
    fn from_snapshot(snapshot: ChatSnapshot) -> Self {
        Self {
            sessions_by_case: snapshot.sessions_by_case,
            messages_by_session: snapshot.messages_by_session,
            current_session_id: snapshot.current_session_id,
            status: StoreStatus::default(),
        }
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            sessions_by_case: self.sessions_by_case.clone(),
            messages_by_session: self.messages_by_session.clone(),
            current_session_id: self.current_session_id.clone(),
        }
    }

    fn find_message(&self, session_id: &str, message_id: &str) -> Option<&Message> {
        self.messages_by_session
            .get(session_id)?
            .iter()
            .find(|m| m.id == message_id)
    }

    fn find_session(&self, session_id: &str) -> Option<&Session> {
        self.sessions_by_case
            .values()
            .flat_map(|sessions| sessions.iter())
            .find(|s| s.id == session_id)
    }

    fn append_message(&mut self, session_id: &str, message: Message) {
        let mut messages = self
            .messages_by_session
            .get(session_id)
            .cloned()
            .unwrap_or_default();
        messages.push(message);
        self.messages_by_session
            .insert(session_id.to_string(), messages);
    }

    fn patch_message<F>(&mut self, session_id: &str, message_id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Message),
    {
        let Some(current) = self.messages_by_session.get(session_id) else {
            return false;
        };
        let mut messages = current.clone();
        let Some(message) = messages.iter_mut().find(|m| m.id == message_id) else {
            return false;
        };
        apply(message);
        self.messages_by_session
            .insert(session_id.to_string(), messages);
        true
    }

    fn patch_session<F>(&mut self, case_id: &str, session_id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        let Some(current) = self.sessions_by_case.get(case_id) else {
            return false;
        };
        let mut sessions = current.clone();
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            return false;
        };
        apply(session);
        self.sessions_by_case.insert(case_id.to_string(), sessions);
        true
    }
}

fn welcome_message(session_id: &str, title: Option<&str>) -> Message {
    let greeting = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!(
            "Welcome to \"{title}\". Describe the patient's situation or ask a question about this case."
        ),
        None => {
            "Hello! Describe the patient's situation or ask a question about this case.".to_string()
        }
    };
    Message {
        id: format!("welcome-{session_id}"),
        ..Message::local(session_id, MessageRole::Assistant, greeting)
    }
}

/// Local cache of sessions and messages, reconciled with the backend on
/// demand.
///
/// Every backend-backed action mutates the cache only after the call
/// succeeded. The lock is never held while a request is in flight.
pub struct ChatStore {
    api: Arc<dyn ChatApi>,
    settings: Arc<SettingsStore>,
    snapshots: Arc<dyn SnapshotRepository>,
    notifier: Notifier,
    state: RwLock<ChatState>,
}

impl ChatStore {
    pub fn new(
        api: Arc<dyn ChatApi>,
        settings: Arc<SettingsStore>,
        snapshots: Arc<dyn SnapshotRepository>,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            settings,
            snapshots,
            notifier,
            state: RwLock::new(ChatState::default()),
        }
    }

    /// Replaces the cache with the persisted snapshot, if one exists.
    pub async fn restore(&self) -> Result<()> {
        if let Some(snapshot) =
            load_snapshot::<ChatSnapshot>(self.snapshots.as_ref(), CHAT_STORE_RECORD).await?
        {
            tracing::debug!(
                "Restored chat cache: {} cases, {} sessions with messages",
                snapshot.sessions_by_case.len(),
                snapshot.messages_by_session.len()
            );
            *self.state.write().await = ChatState::from_snapshot(snapshot);
        }
        Ok(())
    }

    pub async fn state(&self) -> ChatState {
        self.state.read().await.clone()
    }

    pub async fn sessions(&self, case_id: &str) -> Vec<Session> {
        self.state
            .read()
            .await
            .sessions_by_case
            .get(case_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn messages(&self, session_id: &str) -> Vec<Message> {
        self.state
            .read()
            .await
            .messages_by_session
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Display rows for a session, with `can_react` resolved per message.
    pub async fn messages_view(&self, session_id: &str) -> Vec<MessageView> {
        self.state
            .read()
            .await
            .messages_by_session
            .get(session_id)
            .map(|messages| messages.iter().map(MessageView::from).collect())
            .unwrap_or_default()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.status.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.status.loading
    }

    pub async fn current_session_id(&self) -> Option<String> {
        self.state.read().await.current_session_id.clone()
    }

    pub async fn current_session(&self) -> Option<Session> {
        let state = self.state.read().await;
        let id = state.current_session_id.as_deref()?;
        state.find_session(id).cloned()
    }

    pub async fn select_session(&self, session_id: Option<&str>) {
        self.state.write().await.current_session_id = session_id.map(str::to_string);
        self.persist().await;
    }

    /// Seeds a session that has no message list yet with a single welcome
    /// message. An existing list, even an empty one loaded from the backend,
    /// is left alone.
    ///
    /// Returns `true` when the welcome message was added. No backend call.
    pub async fn ensure_session(&self, session_id: &str, title: Option<&str>) -> bool {
        let seeded = {
            let mut state = self.state.write().await;
            if state.messages_by_session.contains_key(session_id) {
                false
            } else {
                state
                    .messages_by_session
                    .insert(session_id.to_string(), vec![welcome_message(session_id, title)]);
                true
            }
        };
        if seeded {
            tracing::debug!("Seeded session {} with a welcome message", session_id);
            self.persist().await;
        }
        seeded
    }

    /// Replaces the cached session list of a case with the backend's.
    pub async fn list_sessions(&self, patient_id: &str, case_id: &str) -> Result<Vec<Session>> {
        self.state.write().await.status.begin();
        match self.api.list_sessions(patient_id, case_id).await {
            Ok(sessions) => {
                {
                    let mut state = self.state.write().await;
                    state
                        .sessions_by_case
                        .insert(case_id.to_string(), sessions.clone());
                    state.status.succeed();
                }
                self.persist().await;
                Ok(sessions)
            }
            Err(e) => Err(self.fail("load sessions", e).await),
        }
    }

    /// Creates a session on the backend, puts it first in its case list and
    /// makes it current.
    pub async fn start_session(
        &self,
        patient_id: &str,
        case_id: &str,
        title: Option<&str>,
    ) -> Result<Session> {
        self.state.write().await.status.begin();
        match self.api.start_session(patient_id, case_id, title).await {
            Ok(session) => {
                {
                    let mut state = self.state.write().await;
                    let mut sessions = vec![session.clone()];
                    if let Some(existing) = state.sessions_by_case.get(case_id) {
                        sessions.extend(existing.iter().filter(|s| s.id != session.id).cloned());
                    }
                    state.sessions_by_case.insert(case_id.to_string(), sessions);
                    state.current_session_id = Some(session.id.clone());
                    state.status.succeed();
                }
                tracing::info!("Started session {} for case {}", session.id, case_id);
                self.persist().await;
                Ok(session)
            }
            Err(e) => Err(self.fail("start session", e).await),
        }
    }

    /// Replaces the cached message list of a session with the backend's.
    pub async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        self.state.write().await.status.begin();
        match self.api.list_messages(session_id).await {
            Ok(messages) => {
                {
                    let mut state = self.state.write().await;
                    state
                        .messages_by_session
                        .insert(session_id.to_string(), messages.clone());
                    state.status.succeed();
                }
                self.persist().await;
                Ok(messages)
            }
            Err(e) => Err(self.fail("load messages", e).await),
        }
    }

    /// Sends a message with the current generation settings and appends the
    /// backend's copy. The user's text is not echoed before confirmation.
    pub async fn send_message(
        &self,
        session_id: &str,
        case_id: &str,
        patient_id: &str,
        content: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() && attachments.is_empty() {
            return Err(self
                .fail("send message", MedChatError::validation("Message is empty"))
                .await);
        }
        let request = SendMessageRequest {
            session_id: session_id.to_string(),
            case_id: case_id.to_string(),
            patient_id: patient_id.to_string(),
            content: content.to_string(),
            attachments,
            settings: self.settings.get().await,
        };

        self.state.write().await.status.begin();
        match self.api.send_message(&request).await {
            Ok(message) => {
                {
                    let mut state = self.state.write().await;
                    state.append_message(session_id, message.clone());
                    state.patch_session(case_id, session_id, Session::touch);
                    state.status.succeed();
                }
                self.persist().await;
                Ok(message)
            }
            Err(e) => Err(self.fail("send message", e).await),
        }
    }

    /// Appends a client-originated message. Returns `false` when a message
    /// with the same id is already cached.
    pub async fn add_local_message(&self, session_id: &str, message: Message) -> bool {
        let added = {
            let mut state = self.state.write().await;
            if state.find_message(session_id, &message.id).is_some() {
                false
            } else {
                state.append_message(session_id, message);
                true
            }
        };
        if added {
            self.persist().await;
        }
        added
    }

    /// Deletes a session on the backend, then drops it and its messages from
    /// the cache. If it was current, the first remaining session of the case
    /// becomes current.
    pub async fn delete_session(&self, session_id: &str, case_id: &str) -> Result<()> {
        self.state.write().await.status.begin();
        if let Err(e) = self.api.delete_session(session_id).await {
            return Err(self.fail("delete session", e).await);
        }
        {
            let mut state = self.state.write().await;
            // A case that was never cached stays uncached.
            let remaining: Option<Vec<Session>> = state.sessions_by_case.get(case_id).map(|sessions| {
                sessions
                    .iter()
                    .filter(|s| s.id != session_id)
                    .cloned()
                    .collect()
            });
            if state.current_session_id.as_deref() == Some(session_id) {
                state.current_session_id = remaining
                    .as_ref()
                    .and_then(|sessions| sessions.first())
                    .map(|s| s.id.clone());
            }
            if let Some(remaining) = remaining {
                state.sessions_by_case.insert(case_id.to_string(), remaining);
            }
            state.messages_by_session.remove(session_id);
            state.status.succeed();
        }
        tracing::info!("Deleted session {}", session_id);
        self.persist().await;
        Ok(())
    }

    /// Renames a session on the backend, then patches the cached title.
    pub async fn update_session(&self, session_id: &str, case_id: &str, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self
                .fail("rename session", MedChatError::validation("Title is required"))
                .await);
        }
        self.state.write().await.status.begin();
        if let Err(e) = self.api.rename_session(session_id, title).await {
            return Err(self.fail("rename session", e).await);
        }
        {
            let mut state = self.state.write().await;
            let patched = state.patch_session(case_id, session_id, |session| {
                session.title = Some(title.to_string());
                session.touch();
            });
            if !patched {
                tracing::debug!("Renamed session {} is not cached for case {}", session_id, case_id);
            }
            state.status.succeed();
        }
        self.persist().await;
        Ok(())
    }

    pub async fn like_message(&self, session_id: &str, message_id: &str) -> FeedbackOutcome {
        self.react(session_id, message_id, Reaction::Like).await
    }

    pub async fn dislike_message(&self, session_id: &str, message_id: &str) -> FeedbackOutcome {
        self.react(session_id, message_id, Reaction::Dislike).await
    }

    /// Toggles a reaction. Pressing the active reaction clears it.
    pub async fn react(&self, session_id: &str, message_id: &str, pressed: Reaction) -> FeedbackOutcome {
        let action = match pressed {
            Reaction::Like => "like message",
            Reaction::Dislike => "dislike message",
        };
        let (server_id, current) = match self.reaction_target(session_id, message_id).await {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        let next = toggle_reaction(current, pressed);
        match self.api.set_reaction(&server_id, next).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .patch_message(session_id, message_id, |m| m.like = next);
                self.persist().await;
                FeedbackOutcome::Applied
            }
            Err(e) => {
                let err = self.fail(action, e).await;
                FeedbackOutcome::Failed(err.reason())
            }
        }
    }

    /// Sets or clears the star rating and free-text feedback in one call.
    pub async fn submit_feedback(
        &self,
        session_id: &str,
        message_id: &str,
        submission: FeedbackSubmission,
    ) -> FeedbackOutcome {
        if let Err(e) = submission.validate() {
            let err = self.fail("submit feedback", e).await;
            return FeedbackOutcome::Skipped(err.reason());
        }
        let (server_id, _) = match self.reaction_target(session_id, message_id).await {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        match self
            .api
            .edit_feedback(&server_id, submission.stars, submission.text.as_deref())
            .await
        {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .patch_message(session_id, message_id, |m| {
                        m.stars = submission.stars;
                        m.feedback = submission.text.clone();
                    });
                self.persist().await;
                self.notifier.info("submit feedback", "Thanks for your feedback");
                FeedbackOutcome::Applied
            }
            Err(e) => {
                let err = self.fail("submit feedback", e).await;
                FeedbackOutcome::Failed(err.reason())
            }
        }
    }

    /// Drops the whole cache and its persisted snapshot.
    pub async fn clear(&self) {
        *self.state.write().await = ChatState::default();
        if let Err(e) = self.snapshots.remove(CHAT_STORE_RECORD).await {
            tracing::warn!("Failed to remove chat snapshot: {}", e);
        }
    }

    async fn reaction_target(
        &self,
        session_id: &str,
        message_id: &str,
    ) -> std::result::Result<(String, Option<Reaction>), FeedbackOutcome> {
        let state = self.state.read().await;
        let Some(message) = state.find_message(session_id, message_id) else {
            return Err(FeedbackOutcome::Skipped(format!(
                "Message {message_id} is not loaded"
            )));
        };
        match message.server_message_id.as_deref() {
            Some(server_id) if !server_id.is_empty() => Ok((server_id.to_string(), message.like)),
            _ => {
                tracing::debug!("Message {} has no server id yet; ignoring", message_id);
                Err(FeedbackOutcome::Skipped(
                    "Message has not been saved yet".to_string(),
                ))
            }
        }
    }

    async fn fail(&self, action: &str, err: MedChatError) -> MedChatError {
        self.state
            .write()
            .await
            .status
            .fail(&self.notifier, action, err)
    }

    async fn persist(&self) {
        let snapshot = self.state.read().await.snapshot();
        if let Err(e) = save_snapshot(self.snapshots.as_ref(), CHAT_STORE_RECORD, &snapshot).await {
            tracing::warn!("Failed to persist chat cache: {}", e);
        }
    }
}
