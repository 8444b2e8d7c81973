use super::CommandError;
use crate::channel::LineChannel;

const HELP: &[&str] = &[
    "Commands:",
    "  h|help - Show this help.",
    "  list - List the existing quizzes.",
    "  show <id> - Show the question and the answer of the given quiz.",
    "  add - Add a new quiz interactively.",
    "  delete <id> - Delete the given quiz.",
    "  edit <id> - Edit the given quiz.",
    "  test <id> - Try the given quiz.",
    "  p|play - Play: answer every quiz in random order.",
    "  credits - Credits.",
    "  q|quit - Leave the session.",
];

const AUTHORS: &[&str] = &["The quiz server authors", "and its contributors"];

pub(crate) async fn help(channel: &mut LineChannel) -> Result<(), CommandError> {
    for line in HELP {
        channel.write_line(line).await?;
    }
    Ok(())
}

pub(crate) async fn credits(channel: &mut LineChannel) -> Result<(), CommandError> {
    let style = channel.style();
    channel.write_line("Authors:").await?;
    for author in AUTHORS {
        channel.write_line(&style.success(author)).await?;
    }
    Ok(())
}
