// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents one row of the 'scores' table: the persisted outcome of a
/// completed quiz attempt. Append-only, never mutated after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user: String,
    pub subject: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

/// The graded outcome of one evaluated attempt. Created once by the
/// evaluator; persistence is the caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub subject: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub grade: String,
    pub remark: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingSummary>,
}

/// Per-question elapsed-time analysis, present only when the client
/// recorded times alongside the answers. Never affects the score.
#[derive(Debug, Clone, Serialize)]
pub struct TimingSummary {
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub fastest_seconds: f64,
    pub slowest_seconds: f64,
}

/// Summary statistics over a percentage collection. Purely derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// One ranked row of a per-subject leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub user: String,
    pub percentage: f64,
}

/// One interval of a score histogram. Half-open, except the final bucket
/// which is closed at the data maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}
