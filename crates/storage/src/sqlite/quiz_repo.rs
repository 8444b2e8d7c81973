use quiz_core::model::{Quiz, QuizId};

use super::{
    SqliteRepository,
    mapping::{map_quiz_row, quiz_id_from_i64, quiz_id_to_i64},
};
use crate::repository::{NewQuizRecord, QuizRepository, StorageError};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut quizzes = Vec::with_capacity(rows.len());
        for row in rows {
            quizzes.push(map_quiz_row(&row)?);
        }
        Ok(quizzes)
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            WHERE id = ?1
            ",
        )
        .bind(quiz_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_quiz_row).transpose()
    }

    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO quizzes (question, answer, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ",
        )
        .bind(&record.question)
        .bind(&record.answer)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(Quiz {
            id: quiz_id_from_i64(result.last_insert_rowid())?,
            question: record.question,
            answer: record.answer,
            created_at: record.created_at,
            updated_at: record.created_at,
        })
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<Quiz, StorageError> {
        // created_at is immutable; only content and updated_at change.
        let row = sqlx::query(
            r"
            UPDATE quizzes
            SET question = ?2, answer = ?3, updated_at = ?4
            WHERE id = ?1
            RETURNING id, question, answer, created_at, updated_at
            ",
        )
        .bind(quiz_id_to_i64(quiz.id)?)
        .bind(&quiz.question)
        .bind(&quiz.answer)
        .bind(quiz.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => map_quiz_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?1")
            .bind(quiz_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        tracing::debug!(%id, deleted = result.rows_affected(), "delete quiz");
        Ok(())
    }

    async fn count_quizzes(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64::try_from(count).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}
