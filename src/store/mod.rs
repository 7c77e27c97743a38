// src/store/mod.rs

pub mod sqlite;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::question::{AnswerKey, Question};
use crate::models::score::ScoreRecord;

pub use sqlite::{SqliteQuestionStore, SqliteScoreStore};

/// Optional narrowing of a score query. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ScoreFilter {
    pub user: Option<String>,
    pub subject: Option<String>,
}

/// CRUD access to the question bank. The engine only ever sees the
/// `AnswerKey` this trait hands out.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn list_subjects(&self) -> Result<Vec<String>, AppError>;

    /// Returns the subject's questions in stored order. An unknown subject
    /// yields a key with zero questions rather than an error.
    async fn answer_key(&self, subject: &str) -> Result<AnswerKey, AppError>;

    async fn add_question(&self, subject: &str, question: &Question) -> Result<(), AppError>;

    /// Replaces the question at `index` within the subject's stored order,
    /// keeping its position. Returns false when the subject or index does
    /// not exist.
    async fn update_question(
        &self,
        subject: &str,
        index: usize,
        question: &Question,
    ) -> Result<bool, AppError>;

    /// Deletes the question at `index` within the subject's stored order.
    /// Returns false when the subject or index does not exist.
    async fn delete_question(&self, subject: &str, index: usize) -> Result<bool, AppError>;
}

/// Append-only score history.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn append(&self, record: &ScoreRecord) -> Result<(), AppError>;

    /// Matching records ordered by `taken_at` ascending.
    async fn query(&self, filter: &ScoreFilter) -> Result<Vec<ScoreRecord>, AppError>;

    /// Deletes matching records, returning how many were removed.
    async fn delete(&self, filter: &ScoreFilter) -> Result<u64, AppError>;
}
