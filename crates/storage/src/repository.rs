use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Quiz, QuizId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a quiz; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewQuizRecord {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Repository contract for quiz records.
///
/// Every method is a single atomic operation; callers never hold a transaction
/// across calls.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// All quizzes ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch one quiz; `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Insert a quiz and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError>;

    /// Overwrite question, answer and `updated_at` of an existing quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the quiz no longer exists.
    async fn update_quiz(&self, quiz: &Quiz) -> Result<Quiz, StorageError>;

    /// Delete a quiz. Deleting an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError>;

    /// Number of stored quizzes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn count_quizzes(&self) -> Result<u64, StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    next_id: u64,
    quizzes: BTreeMap<QuizId, Quiz>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.values().cloned().collect())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.get(&id).cloned())
    }

    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError> {
        let mut guard = self.lock()?;
        guard.next_id += 1;
        let quiz = Quiz {
            id: QuizId::new(guard.next_id),
            question: record.question,
            answer: record.answer,
            created_at: record.created_at,
            updated_at: record.created_at,
        };
        guard.quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<Quiz, StorageError> {
        let mut guard = self.lock()?;
        let stored = guard.quizzes.get_mut(&quiz.id).ok_or(StorageError::NotFound)?;
        stored.question.clone_from(&quiz.question);
        stored.answer.clone_from(&quiz.answer);
        stored.updated_at = quiz.updated_at;
        Ok(stored.clone())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.quizzes.remove(&id);
        Ok(())
    }

    async fn count_quizzes(&self) -> Result<u64, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.len() as u64)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(InMemoryRepository::new());
        Self { quizzes }
    }
}
