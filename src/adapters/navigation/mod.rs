//! Checkout navigator adapters.
//!
//! - `LogNavigator` - logs the hand-off URL (terminal shell, where there is
//!   no browser to redirect)
//! - `InMemoryNavigator` - remembers the URLs it was sent to (tests)

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::ports::CheckoutNavigator;

#[derive(Debug, Clone, Default)]
pub struct LogNavigator;

impl CheckoutNavigator for LogNavigator {
    fn redirect(&self, url: &str) {
        info!(url = %url, "Handing off to checkout");
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl InMemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Most recent redirect target.
    pub fn last_url(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl CheckoutNavigator for InMemoryNavigator {
    fn redirect(&self, url: &str) {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
    }
}
