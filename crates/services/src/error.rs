//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizValidationError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// The record the operation targeted no longer exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound))
    }
}

/// Errors emitted by a `PlaySession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("drawn index {index} does not name a remaining quiz ({remaining} left)")]
    InconsistentDraw { index: usize, remaining: usize },
    #[error("no question is waiting for an answer")]
    NotAsking,
}
