#![forbid(unsafe_code)]

pub mod error;
pub mod play;
pub mod quiz_service;
pub mod seed;

pub use quiz_core::Clock;

pub use error::{PlayError, QuizServiceError};
pub use play::{PlaySession, PlayState, Verdict};
pub use quiz_service::QuizService;
pub use seed::{SeedOutcome, default_quizzes};
