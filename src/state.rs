use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::store::{QuestionStore, ScoreStore, SqliteQuestionStore, SqliteScoreStore};

/// The two store handles the handlers work against. Constructed once by the
/// composition root and injected everywhere through axum state, so there is
/// no hidden global store instance.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<dyn QuestionStore>,
    pub scores: Arc<dyn ScoreStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            questions: Arc::new(SqliteQuestionStore::new(pool.clone())),
            scores: Arc::new(SqliteScoreStore::new(pool)),
        }
    }
}

impl FromRef<AppState> for Arc<dyn QuestionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ScoreStore> {
    fn from_ref(state: &AppState) -> Self {
        state.scores.clone()
    }
}
