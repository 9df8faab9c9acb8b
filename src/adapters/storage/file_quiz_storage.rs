//! File-based Quiz Storage Adapter
//!
//! Stores each layout key as its own file inside a data directory:
//! `<data_dir>/quizData` holds the JSON record, `<data_dir>/quizStep` the
//! step number. Plain files keep the saved state easy to inspect.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{PersistedQuiz, QuizStateStorage, QuizStorageError};

use super::layout::{self, QUIZ_DATA_KEY, QUIZ_STEP_KEY};

/// File-based storage for the saved quiz
#[derive(Debug, Clone)]
pub struct FileQuizStorage {
    data_dir: PathBuf,
}

impl FileQuizStorage {
    /// Create a new file storage rooted at `data_dir`
    ///
    /// The directory is created on first save.
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileQuizStorage::new("./data/quiz");
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }

    /// Read a key, mapping a missing file to `None`
    async fn read_key(&self, key: &str) -> Result<Option<String>, QuizStorageError> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(QuizStorageError::DeserializationFailed(format!("{}: {}", key, e)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a key, ignoring a missing file
    async fn remove_key(&self, key: &str) -> Result<(), QuizStorageError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl QuizStateStorage for FileQuizStorage {
    async fn load(&self) -> Result<Option<PersistedQuiz>, QuizStorageError> {
        let data = self.read_key(QUIZ_DATA_KEY).await?;
        let step = self.read_key(QUIZ_STEP_KEY).await?;
        layout::decode(data, step)
    }

    async fn save(&self, state: &PersistedQuiz) -> Result<(), QuizStorageError> {
        let (data, step) = layout::encode(state)?;

        fs::create_dir_all(&self.data_dir).await?;
        fs::write(self.key_path(QUIZ_DATA_KEY), data).await?;
        fs::write(self.key_path(QUIZ_STEP_KEY), step).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), QuizStorageError> {
        for key in layout::KEYS {
            self.remove_key(key).await?;
        }
        Ok(())
    }
}
