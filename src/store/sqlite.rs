// src/store/sqlite.rs

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, types::Json};

use crate::error::AppError;
use crate::models::question::{AnswerKey, Question};
use crate::models::score::ScoreRecord;

use super::{QuestionStore, ScoreFilter, ScoreStore};

/// Helper struct for fetching questions from the database.
/// Options live in a JSON TEXT column.
#[derive(sqlx::FromRow)]
struct QuestionRow {
    text: String,
    options: Json<Vec<String>>,
    correct_index: i64,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            text: row.text,
            options: row.options.0,
            // A negative index from a tampered database is mapped to an
            // impossible option, which the evaluator scores as incorrect.
            correct_index: usize::try_from(row.correct_index).unwrap_or(usize::MAX),
        }
    }
}

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn list_subjects(&self) -> Result<Vec<String>, AppError> {
        let subjects: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT subject FROM questions ORDER BY subject")
                .fetch_all(&self.pool)
                .await?;

        Ok(subjects.into_iter().map(|(s,)| s).collect())
    }

    async fn answer_key(&self, subject: &str) -> Result<AnswerKey, AppError> {
        // Insertion order (rowid) is the canonical question order.
        let rows: Vec<QuestionRow> = sqlx::query_as(
            "SELECT text, options, correct_index FROM questions WHERE subject = ?1 ORDER BY id",
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await?;

        Ok(AnswerKey {
            subject: subject.to_string(),
            questions: rows.into_iter().map(Question::from).collect(),
        })
    }

    async fn add_question(&self, subject: &str, question: &Question) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO questions (subject, text, options, correct_index) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(subject)
        .bind(&question.text)
        .bind(Json(&question.options))
        .bind(question.correct_index as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_question(
        &self,
        subject: &str,
        index: usize,
        question: &Question,
    ) -> Result<bool, AppError> {
        // Same position resolution as delete_question: the row keeps its id,
        // so the question stays at its place in the subject's order.
        let result = sqlx::query(
            "UPDATE questions SET text = ?1, options = ?2, correct_index = ?3 WHERE id IN (
                SELECT id FROM questions WHERE subject = ?4 ORDER BY id LIMIT 1 OFFSET ?5
            )",
        )
        .bind(&question.text)
        .bind(Json(&question.options))
        .bind(question.correct_index as i64)
        .bind(subject)
        .bind(index as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_question(&self, subject: &str, index: usize) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM questions WHERE id IN (
                SELECT id FROM questions WHERE subject = ?1 ORDER BY id LIMIT 1 OFFSET ?2
            )",
        )
        .bind(subject)
        .bind(index as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct SqliteScoreStore {
    pool: SqlitePool,
}

impl SqliteScoreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Appends the filter's conditions as a WHERE clause.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ScoreFilter) {
    let mut prefix = " WHERE ";
    if let Some(user) = &filter.user {
        builder.push(prefix).push("user = ").push_bind(user.clone());
        prefix = " AND ";
    }
    if let Some(subject) = &filter.subject {
        builder
            .push(prefix)
            .push("subject = ")
            .push_bind(subject.clone());
    }
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn append(&self, record: &ScoreRecord) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO scores (user, subject, score, total, percentage, taken_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.user)
        .bind(&record.subject)
        .bind(record.score)
        .bind(record.total)
        .bind(record.percentage)
        .bind(record.taken_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn query(&self, filter: &ScoreFilter) -> Result<Vec<ScoreRecord>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT user, subject, score, total, percentage, taken_at FROM scores",
        );
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY taken_at ASC, id ASC");

        let records = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(records)
    }

    async fn delete(&self, filter: &ScoreFilter) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM scores");
        push_filter(&mut builder, filter);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
