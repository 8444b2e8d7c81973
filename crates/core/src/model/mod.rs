mod answer;
mod ids;
mod quiz;

pub use answer::{answers_match, normalize_answer};
pub use ids::{ParseIdError, QuizId};
pub use quiz::{FieldError, Quiz, QuizDraft, QuizField, QuizValidationError, ValidatedQuiz};
