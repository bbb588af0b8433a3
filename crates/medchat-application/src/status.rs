//! Loading/error bookkeeping shared by all stores.

use crate::notification::Notifier;
use medchat_core::MedChatError;

/// Transient status of a store; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    /// Human-readable reason of the last failed action.
    pub error: Option<String>,
}

impl StoreStatus {
    /// Marks the start of a backend call.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Marks a successful end of a backend call.
    pub fn succeed(&mut self) {
        self.loading = false;
    }

    /// Records a failure and publishes it; returns the error for propagation.
    pub fn fail(&mut self, notifier: &Notifier, action: &str, err: MedChatError) -> MedChatError {
        tracing::warn!("{} failed: {}", action, err);
        self.loading = false;
        self.error = Some(err.reason());
        notifier.error(action, &err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_records_reason_and_notifies() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        let mut status = StoreStatus::default();

        status.begin();
        assert!(status.loading);

        let err = status.fail(&notifier, "load patients", MedChatError::http(500, "db down"));
        assert_eq!(err, MedChatError::http(500, "db down"));
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some("db down"));
        assert_eq!(rx.try_recv().unwrap().action, "load patients");

        status.begin();
        assert!(status.error.is_none());
    }
}
