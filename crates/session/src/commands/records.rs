//! CRUD commands: list, show, add, edit, delete.

use quiz_core::model::{Quiz, QuizDraft};
use services::QuizService;

use super::{CommandError, fetch, validate_id};
use crate::channel::LineChannel;

fn full_line(channel: &LineChannel, quiz: &Quiz) -> String {
    let style = channel.style();
    format!("{} {} {}", quiz.question, style.separator(), quiz.answer)
}

pub(crate) async fn list(
    channel: &mut LineChannel,
    service: &QuizService,
) -> Result<(), CommandError> {
    let quizzes = service.list_quizzes().await?;
    let style = channel.style();
    for quiz in &quizzes {
        channel
            .write_line(&format!(" {}: {}", style.id(quiz.id), quiz.question))
            .await?;
    }
    Ok(())
}

pub(crate) async fn show(
    channel: &mut LineChannel,
    service: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = fetch(service, id).await?;
    let line = format!(" {}:  {}", channel.style().id(quiz.id), full_line(channel, &quiz));
    channel.write_line(&line).await?;
    Ok(())
}

pub(crate) async fn add(
    channel: &mut LineChannel,
    service: &QuizService,
) -> Result<(), CommandError> {
    let question = channel.ask(" Enter a question: ").await?;
    let answer = channel.ask(" Enter the answer: ").await?;
    let quiz = service.create_quiz(QuizDraft::new(question, answer)).await?;

    let style = channel.style();
    let line = format!(
        " {} {}: {}",
        style.accent("Added"),
        style.id(quiz.id),
        full_line(channel, &quiz)
    );
    channel.write_line(&line).await?;
    Ok(())
}

pub(crate) async fn delete(
    channel: &mut LineChannel,
    service: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let shown = match validate_id(arg) {
        Ok(id) => {
            service.delete_quiz(id).await?;
            id.to_string()
        }
        // Deleting a quiz that cannot exist is the same no-op as any unknown id.
        Err(CommandError::RecordNotFound(shown)) => shown,
        Err(err) => return Err(err),
    };
    let line = format!(" Deleted quiz {}.", channel.style().id_label(&shown));
    channel.write_line(&line).await?;
    Ok(())
}

pub(crate) async fn edit(
    channel: &mut LineChannel,
    service: &QuizService,
    arg: Option<&str>,
) -> Result<(), CommandError> {
    let id = validate_id(arg)?;
    let quiz = fetch(service, id).await?;

    let question = channel
        .ask_with_default(" Enter the question: ", &quiz.question)
        .await?;
    let answer = channel
        .ask_with_default(" Enter the answer: ", &quiz.answer)
        .await?;
    // Another session may have deleted it while we were asking.
    let saved = service
        .save_quiz(quiz, QuizDraft::new(question, answer))
        .await
        .map_err(|err| {
            if err.is_not_found() {
                CommandError::RecordNotFound(id.to_string())
            } else {
                err.into()
            }
        })?;

    let line = format!(
        " Changed quiz {} to: {}",
        channel.style().id(saved.id),
        full_line(channel, &saved)
    );
    channel.write_line(&line).await?;
    Ok(())
}
