use quiz_core::model::QuizValidationError;
use services::{PlayError, QuizServiceError};
use thiserror::Error;

use crate::channel::{ChannelError, LineChannel};

/// Everything a command handler can fail with.
///
/// All variants but `Closed` are recovered by the dispatcher and shown to the
/// client; `Closed` ends the session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    #[error("Missing parameter <id>.")]
    MissingParameter,
    #[error("The <id> parameter is not a number: {raw:?}.")]
    NotANumber { raw: String },
    /// Carries the id as the client gave it, which need not fit a `QuizId`.
    #[error("There is no quiz with id={0}.")]
    RecordNotFound(String),
    #[error("The quiz is invalid:")]
    Invalid(QuizValidationError),
    #[error("{0}")]
    Service(QuizServiceError),
    #[error("Play aborted: {0}")]
    Play(#[from] PlayError),
    #[error(transparent)]
    Closed(#[from] ChannelError),
}

impl From<QuizServiceError> for CommandError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Validation(v) => Self::Invalid(v),
            other => Self::Service(other),
        }
    }
}

impl CommandError {
    /// Render the failure as error line(s) on the channel.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError` if the client cannot be written to.
    pub async fn report(&self, channel: &mut LineChannel) -> Result<(), ChannelError> {
        let style = channel.style();
        channel.write_line(&style.error(&self.to_string())).await?;
        if let Self::Invalid(validation) = self {
            for message in validation.messages() {
                channel.write_line(&style.error(message)).await?;
            }
        }
        Ok(())
    }
}
