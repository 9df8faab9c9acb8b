//! In-Memory Quiz Storage Adapter
//!
//! Keeps the two layout keys in a map. Useful for tests and for running
//! the flow without durability.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{PersistedQuiz, QuizStateStorage, QuizStorageError};

use super::layout::{self, QUIZ_DATA_KEY, QUIZ_STEP_KEY};

/// In-memory key-value store for the saved quiz.
///
/// Clones share the same map, so a test can hold one handle while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct InMemoryQuizStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryQuizStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Write a raw value under `key`, bypassing encoding (useful for tests)
    pub async fn put_raw(&self, key: &str, value: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.into());
    }

    /// Read the raw value under `key`
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Get the number of stored keys
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Make every subsequent save and clear fail with an IO error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), QuizStorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(QuizStorageError::IoError("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryQuizStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizStateStorage for InMemoryQuizStorage {
    async fn load(&self) -> Result<Option<PersistedQuiz>, QuizStorageError> {
        let entries = self.entries.read().await;
        layout::decode(
            entries.get(QUIZ_DATA_KEY).cloned(),
            entries.get(QUIZ_STEP_KEY).cloned(),
        )
    }

    async fn save(&self, state: &PersistedQuiz) -> Result<(), QuizStorageError> {
        self.check_writable()?;
        let (data, step) = layout::encode(state)?;

        let mut entries = self.entries.write().await;
        entries.insert(QUIZ_DATA_KEY.to_string(), data);
        entries.insert(QUIZ_STEP_KEY.to_string(), step);
        Ok(())
    }

    async fn clear(&self) -> Result<(), QuizStorageError> {
        self.check_writable()?;
        let mut entries = self.entries.write().await;
        for key in layout::KEYS {
            entries.remove(key);
        }
        Ok(())
    }
}
