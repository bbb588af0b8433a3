//! Transient user-facing notifications.
//!
//! Stores publish a [`Notification`] whenever an action fails (and for a few
//! confirmations). A front end subscribes and renders them as toasts; nobody
//! listening is not an error.

use medchat_core::MedChatError;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One toast: which action, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub action: String,
    pub reason: String,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            NotificationLevel::Info => write!(f, "{}: {}", self.action, self.reason),
            NotificationLevel::Error => write!(f, "Failed to {}: {}", self.action, self.reason),
        }
    }
}

/// Broadcast channel shared by every store of an application context.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn error(&self, action: &str, err: &MedChatError) {
        self.publish(Notification {
            level: NotificationLevel::Error,
            action: action.to_string(),
            reason: err.reason(),
        });
    }

    pub fn info(&self, action: &str, message: impl Into<String>) {
        self.publish(Notification {
            level: NotificationLevel::Info,
            action: action.to_string(),
            reason: message.into(),
        });
    }

    fn publish(&self, notification: Notification) {
        // No subscribers is fine.
        let _ = self.sender.send(notification);
    }
}
