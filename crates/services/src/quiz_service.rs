use std::sync::Arc;

use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::{NewQuizRecord, QuizRepository};

use crate::Clock;
use crate::error::QuizServiceError;

/// Validated CRUD over the quiz store, shared by every session.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// All quizzes as an owned snapshot, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        let quizzes = self.quizzes.list_quizzes().await?;
        tracing::debug!(count = quizzes.len(), "listed quizzes");
        Ok(quizzes)
    }

    /// Fetch a quiz by id.
    ///
    /// Returns `Ok(None)` when the quiz does not exist.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, QuizServiceError> {
        Ok(self.quizzes.get_quiz(id).await?)
    }

    /// Validate a draft and persist it as a new quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` listing every invalid field.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, QuizServiceError> {
        let (question, answer) = draft.validate()?.into_parts();
        let quiz = self
            .quizzes
            .insert_quiz(NewQuizRecord {
                question,
                answer,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(id = %quiz.id, "created quiz");
        Ok(quiz)
    }

    /// Replace the content of `quiz` with `draft` and save it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` listing every invalid field.
    /// Returns `QuizServiceError::Storage` if the quiz vanished or persistence fails.
    pub async fn save_quiz(
        &self,
        mut quiz: Quiz,
        draft: QuizDraft,
    ) -> Result<Quiz, QuizServiceError> {
        quiz.apply(draft.validate()?, self.clock.now());
        let saved = self.quizzes.update_quiz(&quiz).await?;
        tracing::info!(id = %saved.id, "updated quiz");
        Ok(saved)
    }

    /// Delete a quiz; unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        self.quizzes.delete_quiz(id).await?;
        tracing::info!(%id, "deleted quiz");
        Ok(())
    }

    /// Number of stored quizzes.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn count_quizzes(&self) -> Result<u64, QuizServiceError> {
        Ok(self.quizzes.count_quizzes().await?)
    }
}
