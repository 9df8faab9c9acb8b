//! Quiz State Storage Port - Interface for persisting an in-progress quiz.
//!
//! A saved quiz is the pair `(step, record)`. Implementations decide how the
//! pair is laid out (the shipped adapters use two keys, `quizData` and
//! `quizStep`) but must round-trip it exactly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::profile::AnswerRecord;

/// The state written after every change to the flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedQuiz {
    /// Persisted step number (questions, then the results tail).
    pub step: u32,
    pub record: AnswerRecord,
}

impl PersistedQuiz {
    pub fn new(step: u32, record: AnswerRecord) -> Self {
        Self { step, record }
    }
}

/// Errors that can occur during quiz storage operations
#[derive(Debug, thiserror::Error)]
pub enum QuizStorageError {
    #[error("Saved quiz is incomplete: missing '{0}'")]
    NotFound(&'static str),

    #[error("Failed to serialize quiz state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize quiz state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl QuizStorageError {
    /// Whether the stored bytes exist but cannot be read back.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            QuizStorageError::NotFound(_) | QuizStorageError::DeserializationFailed(_)
        )
    }
}

impl From<std::io::Error> for QuizStorageError {
    fn from(err: std::io::Error) -> Self {
        QuizStorageError::IoError(err.to_string())
    }
}

/// Port for saving, loading and clearing the in-progress quiz
#[async_trait]
pub trait QuizStateStorage: Send + Sync {
    /// Load the saved quiz.
    ///
    /// # Returns
    /// `None` when nothing has been saved.
    ///
    /// # Errors
    /// `DeserializationFailed` or `NotFound` when only part of the state is
    /// present or it cannot be decoded; `IoError` when the store is unreadable.
    async fn load(&self) -> Result<Option<PersistedQuiz>, QuizStorageError>;

    /// Save the quiz, replacing whatever was saved before.
    async fn save(&self, state: &PersistedQuiz) -> Result<(), QuizStorageError>;

    /// Remove the saved quiz. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), QuizStorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_displays_correctly() {
        let err = QuizStorageError::DeserializationFailed("expected value".to_string());
        assert_eq!(
            format!("{}", err),
            "Failed to deserialize quiz state: expected value"
        );
        let err = QuizStorageError::NotFound("quizStep");
        assert_eq!(format!("{}", err), "Saved quiz is incomplete: missing 'quizStep'");
    }

    #[test]
    fn corrupt_errors_are_flagged() {
        assert!(QuizStorageError::DeserializationFailed(String::new()).is_corrupt());
        assert!(QuizStorageError::NotFound("quizData").is_corrupt());
        assert!(!QuizStorageError::IoError("disk full".to_string()).is_corrupt());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: QuizStorageError = io.into();
        assert!(matches!(err, QuizStorageError::IoError(_)));
    }

    #[test]
    fn quiz_state_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn QuizStateStorage) {}
    }
}
