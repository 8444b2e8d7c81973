use chrono::Duration;
use quiz_core::model::QuizId;
use quiz_core::time::fixed_now;
use storage::repository::{NewQuizRecord, QuizRepository, StorageError};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn record(question: &str, answer: &str) -> NewQuizRecord {
    NewQuizRecord {
        question: question.to_string(),
        answer: answer.to_string(),
        created_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_roundtrip_create_update_delete() {
    let repo = connect("memdb_quiz_roundtrip").await;

    let created = repo
        .insert_quiz(record("Capital of Italy", "Rome"))
        .await
        .unwrap();
    assert_eq!(created.question, "Capital of Italy");
    assert_eq!(created.created_at, fixed_now());

    let fetched = repo.get_quiz(created.id).await.unwrap().expect("stored");
    assert_eq!(fetched, created);

    let mut edited = fetched.clone();
    edited.answer = "Roma".into();
    edited.updated_at = fixed_now() + Duration::minutes(1);
    let saved = repo.update_quiz(&edited).await.unwrap();
    assert_eq!(saved.answer, "Roma");
    assert_eq!(saved.created_at, fixed_now());
    assert_eq!(saved.updated_at, edited.updated_at);

    repo.delete_quiz(created.id).await.unwrap();
    assert!(repo.get_quiz(created.id).await.unwrap().is_none());

    // Deleting twice is a silent no-op.
    repo.delete_quiz(created.id).await.unwrap();

    let err = repo.update_quiz(&edited).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_lists_in_id_order_and_counts() {
    let repo = connect("memdb_quiz_listing").await;
    assert_eq!(repo.count_quizzes().await.unwrap(), 0);

    let first = repo.insert_quiz(record("Q1", "A1")).await.unwrap();
    let second = repo.insert_quiz(record("Q2", "A2")).await.unwrap();

    let listed = repo.list_quizzes().await.unwrap();
    let ids: Vec<QuizId> = listed.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(repo.count_quizzes().await.unwrap(), 2);
    assert!(repo.get_quiz(QuizId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_quiz_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.insert_quiz(record("Q", "A")).await.unwrap();
    assert_eq!(repo.count_quizzes().await.unwrap(), 1);
}
