//! Notifier adapters.
//!
//! - `LogNotifier` - writes notifications to the tracing log (terminal shell)
//! - `InMemoryNotifier` - records notifications for assertions in tests

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::ports::{Notification, Notifier};

/// Emits each notification as an info-level log line.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            title = %notification.title,
            description = %notification.description,
            "Notification"
        );
    }
}

/// Keeps every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.sent().len()
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_notifier_records_in_order() {
        let notifier = InMemoryNotifier::new();
        let handle = notifier.clone();
        notifier.notify(Notification::new("a", "first"));
        notifier.notify(Notification::new("b", "second"));

        let sent = handle.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].title, "a");
        assert_eq!(sent[1].description, "second");
    }

    #[test]
    fn log_notifier_does_not_panic() {
        LogNotifier.notify(Notification::checkout_redirect());
    }
}
