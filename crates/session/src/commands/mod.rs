//! Command parsing and dispatch.
//!
//! Handlers only report success or a `CommandError`; rendering the error and
//! re-arming the prompt happen in one place, so no handler can skip them.

mod error;
mod info;
mod quiz;
mod records;
mod validate;

use quiz_core::model::{Quiz, QuizId};
use services::QuizService;

use crate::channel::{ChannelError, LineChannel};

pub use error::CommandError;
pub use validate::validate_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show,
    Add,
    Delete,
    Edit,
    Test,
    Play,
    Credits,
    Quit,
}

impl Command {
    /// Resolve a command name or alias, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h" | "help" => Some(Self::Help),
            "list" => Some(Self::List),
            "show" => Some(Self::Show),
            "add" => Some(Self::Add),
            "delete" => Some(Self::Delete),
            "edit" => Some(Self::Edit),
            "test" => Some(Self::Test),
            "p" | "play" => Some(Self::Play),
            "credits" => Some(Self::Credits),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// What the session does after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Split a command line into its name and first argument.
#[must_use]
pub fn split_line(line: &str) -> Option<(&str, Option<&str>)> {
    let mut words = line.split_whitespace();
    let name = words.next()?;
    Some((name, words.next()))
}

pub(crate) async fn fetch(service: &QuizService, id: QuizId) -> Result<Quiz, CommandError> {
    service
        .get_quiz(id)
        .await?
        .ok_or_else(|| CommandError::RecordNotFound(id.to_string()))
}

/// Run one command line to completion.
///
/// Every failure except a lost connection is written to the channel here.
///
/// # Errors
///
/// Returns `ChannelError` only when the client can no longer be reached.
pub async fn dispatch(
    channel: &mut LineChannel,
    service: &QuizService,
    line: &str,
) -> Result<Flow, ChannelError> {
    let Some((name, arg)) = split_line(line) else {
        return Ok(Flow::Continue);
    };

    let Some(command) = Command::from_name(name) else {
        tracing::debug!(name, "unknown command");
        let style = channel.style();
        channel
            .write_line(&style.error(&format!("Unknown command: '{name}'")))
            .await?;
        channel
            .write_line("Use 'help' to see the available commands.")
            .await?;
        return Ok(Flow::Continue);
    };

    tracing::debug!(?command, arg, "dispatching");
    let result = match command {
        Command::Help => info::help(channel).await,
        Command::List => records::list(channel, service).await,
        Command::Show => records::show(channel, service, arg).await,
        Command::Add => records::add(channel, service).await,
        Command::Delete => records::delete(channel, service, arg).await,
        Command::Edit => records::edit(channel, service, arg).await,
        Command::Test => quiz::test(channel, service, arg).await,
        Command::Play => quiz::play(channel, service).await,
        Command::Credits => info::credits(channel).await,
        Command::Quit => {
            channel.write_line("Bye!").await?;
            channel.close().await?;
            return Ok(Flow::Quit);
        }
    };

    match result {
        Ok(()) => Ok(Flow::Continue),
        Err(CommandError::Closed(err)) => Err(err),
        Err(err) => {
            tracing::warn!(?command, %err, "command failed");
            err.report(channel).await?;
            Ok(Flow::Continue)
        }
    }
}
