//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the quiz domain and the outside world. Adapters implement these ports.
//!
//! - `QuizStateStorage` - durable `(step, record)` so a visitor can resume
//! - `Notifier` - fire-and-forget toast messages
//! - `CheckoutNavigator` - one-way redirect to the checkout URL

mod checkout_navigator;
mod notifier;
mod quiz_state_storage;

pub use checkout_navigator::CheckoutNavigator;
pub use notifier::{Notification, Notifier};
pub use quiz_state_storage::{PersistedQuiz, QuizStateStorage, QuizStorageError};
