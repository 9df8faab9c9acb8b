//! Storage Adapters
//!
//! Implementations of the QuizStateStorage port.
//!
//! ## Available Adapters
//!
//! - **FileQuizStorage** - One file per layout key in a data directory
//! - **InMemoryQuizStorage** - A shared in-memory map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileQuizStorage, InMemoryQuizStorage};
//!
//! // Production: file-based storage
//! let storage = FileQuizStorage::new("./data/quiz");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryQuizStorage::new();
//! ```

mod file_quiz_storage;
mod in_memory_quiz_storage;
pub mod layout;

pub use file_quiz_storage::FileQuizStorage;
pub use in_memory_quiz_storage::InMemoryQuizStorage;
pub use layout::{QUIZ_DATA_KEY, QUIZ_STEP_KEY};
