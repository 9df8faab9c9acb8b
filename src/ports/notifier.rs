//! Notifier port - toast-style messages for the visitor.

/// A short message shown once, e.g. on checkout hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// The message shown when the visitor is sent to checkout.
    pub fn checkout_redirect() -> Self {
        Self::new(
            "Redirecting to checkout...",
            "You will be taken to the secure payment page.",
        )
    }
}

/// Port for showing notifications.
///
/// Fire-and-forget: implementations must not block and have no way to
/// report failure back to the flow.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
