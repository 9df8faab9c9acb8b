//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the quiz domain to the outside world:
//! - `storage` - Saved quiz state (file, in-memory)
//! - `notification` - Toast notifications (log, in-memory)
//! - `navigation` - Checkout hand-off (log, in-memory)

pub mod navigation;
pub mod notification;
pub mod storage;

pub use navigation::{InMemoryNavigator, LogNavigator};
pub use notification::{InMemoryNotifier, LogNotifier};
pub use storage::{FileQuizStorage, InMemoryQuizStorage};
