use quiz_core::model::QuizDraft;

use crate::error::QuizServiceError;
use crate::quiz_service::QuizService;

/// Starter quizzes inserted into a fresh store.
#[must_use]
pub fn default_quizzes() -> Vec<QuizDraft> {
    vec![
        QuizDraft::new("Capital of Italy", "Rome"),
        QuizDraft::new("Capital of France", "Paris"),
        QuizDraft::new("Capital of Spain", "Madrid"),
        QuizDraft::new("Capital of Portugal", "Lisbon"),
    ]
}

/// What a seeding pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    SkippedNotEmpty(u64),
}

impl QuizService {
    /// Insert the default quizzes when the store is empty, or always when `force` is set.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if counting or inserting fails.
    pub async fn seed_defaults(&self, force: bool) -> Result<SeedOutcome, QuizServiceError> {
        let existing = self.count_quizzes().await?;
        if existing > 0 && !force {
            tracing::debug!(existing, "store already has quizzes, not seeding");
            return Ok(SeedOutcome::SkippedNotEmpty(existing));
        }

        let drafts = default_quizzes();
        let inserted = drafts.len();
        for draft in drafts {
            self.create_quiz(draft).await?;
        }
        tracing::info!(inserted, "seeded default quizzes");
        Ok(SeedOutcome::Inserted(inserted))
    }
}
