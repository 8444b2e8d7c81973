use services::QuizService;

use crate::channel::{ChannelError, LineChannel};
use crate::commands::{Flow, dispatch};

/// Command prompt shown whenever the session is ready for the next command.
pub const PROMPT: &str = "quiz > ";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Disconnected,
    /// The client sent a line over the channel's cap and was cut off.
    LineTooLong,
}

/// Drive one client from welcome to quit or hang-up.
///
/// Commands run strictly one after another: the next line is not read until
/// the current handler has finished and the prompt is back.
///
/// # Errors
///
/// Returns `ChannelError::Io` if the transport fails. A client hanging up,
/// even in the middle of a question, is a normal `SessionEnd::Disconnected`.
/// An oversized line gets one error line before the session is closed.
pub async fn run_session(
    mut channel: LineChannel,
    service: &QuizService,
) -> Result<SessionEnd, ChannelError> {
    channel
        .write_line("Welcome to the quiz. Type 'help' to see the commands.")
        .await?;
    channel.prompt(PROMPT).await?;

    loop {
        let line = match channel.next_command().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(SessionEnd::Disconnected),
            Err(err) => return end_on_error(&mut channel, err).await,
        };

        match dispatch(&mut channel, service, &line).await {
            Ok(Flow::Continue) => channel.prompt(PROMPT).await?,
            Ok(Flow::Quit) => return Ok(SessionEnd::Quit),
            Err(err) => return end_on_error(&mut channel, err).await,
        }
    }
}

async fn end_on_error(
    channel: &mut LineChannel,
    err: ChannelError,
) -> Result<SessionEnd, ChannelError> {
    match err {
        ChannelError::Eof => Ok(SessionEnd::Disconnected),
        ChannelError::LineTooLong { limit } => {
            tracing::warn!(limit, "client line over the cap, closing session");
            let style = channel.style();
            channel.write_line("").await?;
            channel.write_line(&style.error(&err.to_string())).await?;
            channel.close().await?;
            Ok(SessionEnd::LineTooLong)
        }
        other => Err(other),
    }
}
