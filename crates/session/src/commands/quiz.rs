//! Answering commands: test one quiz, or play through all of them.

use crossterm::style::Color;
use services::{PlaySession, QuizService, Verdict};

use super::{CommandError, fetch, validate_id};
use crate::channel::{ChannelError, LineChannel};

pub(crate) async fn test(
    channel: &mut LineChannel,
    service: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = fetch(service, id).await?;
    let reply = channel.ask(&format!("{}? ", quiz.question)).await?;

    let style = channel.style();
    if quiz.is_answered_by(&reply) {
        channel.write_line("Your answer is correct.").await?;
        channel.write_line(&style.big(" Correcta", Color::Green)).await?;
    } else {
        channel.write_line("Your answer is incorrect.").await?;
        channel.write_line(&style.big(" Incorrecta", Color::Red)).await?;
    }
    Ok(())
}

pub(crate) async fn play(
    channel: &mut LineChannel,
    service: &QuizService,
) -> Result<(), CommandError> {
    let snapshot = service.list_quizzes().await?;
    tracing::debug!(quizzes = snapshot.len(), "play started");
    let mut run = PlaySession::new(snapshot);

    loop {
        let prompt = match run.next_question()? {
            Some(quiz) => format!("{}? ", quiz.question),
            None => {
                channel.write_line("Nothing more to ask.").await?;
                break;
            }
        };

        let reply = channel.ask(&prompt).await?;
        match run.answer(&reply)? {
            Verdict::Correct { score } => {
                channel
                    .write_line(&format!("CORRECT - {score} right so far."))
                    .await?;
            }
            Verdict::Incorrect { .. } => {
                channel.write_line("INCORRECT.").await?;
                break;
            }
        }
    }

    tracing::debug!(state = ?run.state(), score = run.score(), "play finished");
    announce_score(channel, run.score()).await?;
    Ok(())
}

async fn announce_score(channel: &mut LineChannel, score: u32) -> Result<(), ChannelError> {
    let style = channel.style();
    channel
        .write_line(&format!("End of game. Score: {score}"))
        .await?;
    channel
        .write_line(&style.big(&format!(" {score}"), Color::Magenta))
        .await
}
