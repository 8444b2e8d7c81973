use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizId};
use services::{Clock, QuizService};
use session::{LineChannel, PROMPT, SessionEnd, Style, run_session};
use storage::repository::{NewQuizRecord, QuizRepository, StorageError};
use tokio::io::AsyncReadExt;

/// Repository whose backend is gone: every call fails.
struct UnreachableRepository;

fn down() -> StorageError {
    StorageError::Connection("database is locked".to_string())
}

#[async_trait]
impl QuizRepository for UnreachableRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        Err(down())
    }

    async fn get_quiz(&self, _id: QuizId) -> Result<Option<Quiz>, StorageError> {
        Err(down())
    }

    async fn insert_quiz(&self, _record: NewQuizRecord) -> Result<Quiz, StorageError> {
        Err(down())
    }

    async fn update_quiz(&self, _quiz: &Quiz) -> Result<Quiz, StorageError> {
        Err(down())
    }

    async fn delete_quiz(&self, _id: QuizId) -> Result<(), StorageError> {
        Err(down())
    }

    async fn count_quizzes(&self) -> Result<u64, StorageError> {
        Err(down())
    }
}

async fn run_script(input: &str) -> (SessionEnd, String) {
    let service = QuizService::new(Clock::default(), Arc::new(UnreachableRepository));
    let (mut client, server) = tokio::io::duplex(1 << 16);
    let channel = LineChannel::new(
        Cursor::new(input.as_bytes().to_vec()),
        server,
        Style::plain(),
        false,
    );
    let task = tokio::spawn(async move { run_session(channel, &service).await });

    let mut out = String::new();
    client.read_to_string(&mut out).await.unwrap();
    (task.await.unwrap().unwrap(), out)
}

fn error_lines(out: &str) -> usize {
    out.lines().filter(|line| line.contains("Error: ")).count()
}

#[tokio::test]
async fn list_reports_one_error_and_session_continues() {
    let (end, out) = run_script("list\nquit\n").await;

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(error_lines(&out), 1, "{out}");
    assert!(out.contains("Error: connection error: database is locked\n"));
    assert_eq!(out.matches(PROMPT).count(), 2);
    assert!(out.ends_with("Bye!\n"));
}

#[tokio::test]
async fn play_reports_one_error_without_asking() {
    let (end, out) = run_script("play\nquit\n").await;

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(error_lines(&out), 1, "{out}");
    assert!(!out.contains("? "));
    assert!(!out.contains("End of game"));
    assert_eq!(out.matches(PROMPT).count(), 2);
}

#[tokio::test]
async fn every_store_backed_command_recovers() {
    let script = "list\nshow 1\nadd\nQ\nA\ndelete 1\nedit 1\ntest 1\nplay\nquit\n";
    let (end, out) = run_script(script).await;

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(error_lines(&out), 7, "{out}");
    // Welcome prompt plus one per command before quit.
    assert_eq!(out.matches(PROMPT).count(), 1 + 7);
    assert!(!out.contains("Deleted quiz"));
}
