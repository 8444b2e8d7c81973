use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuizId;

//
// ─── QUIZ TYPES ────────────────────────────────────────────────────────────────
//

/// User-supplied question/answer pair that has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Check every field and collect all failures, not just the first one.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` listing one `FieldError` per invalid field.
    pub fn validate(self) -> Result<ValidatedQuiz, QuizValidationError> {
        let mut errors = Vec::new();
        if self.question.trim().is_empty() {
            errors.push(FieldError::new(QuizField::Question, "question must not be empty"));
        }
        if self.answer.trim().is_empty() {
            errors.push(FieldError::new(QuizField::Answer, "answer must not be empty"));
        }
        if !errors.is_empty() {
            return Err(QuizValidationError { errors });
        }

        Ok(ValidatedQuiz {
            question: self.question,
            answer: self.answer,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    question: String,
    answer: String,
}

impl ValidatedQuiz {
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.question, self.answer)
    }
}

/// A stored quiz record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: QuizId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Replace question and answer with validated content.
    pub fn apply(&mut self, content: ValidatedQuiz, now: DateTime<Utc>) {
        let (question, answer) = content.into_parts();
        self.question = question;
        self.answer = answer;
        self.updated_at = now;
    }

    /// Whether `reply` matches this quiz's answer.
    #[must_use]
    pub fn is_answered_by(&self, reply: &str) -> bool {
        crate::model::answers_match(&self.answer, reply)
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizField {
    Question,
    Answer,
}

impl fmt::Display for QuizField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizField::Question => f.write_str("question"),
            QuizField::Answer => f.write_str("answer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: QuizField,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: QuizField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid quiz ({} field error(s))", errors.len())]
pub struct QuizValidationError {
    pub errors: Vec<FieldError>,
}

impl QuizValidationError {
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
