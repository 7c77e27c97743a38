// src/handlers/performance.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    engine,
    error::AppError,
    models::score::{HistogramBucket, LeaderboardEntry, ScoreRecord, Statistics},
    store::{ScoreFilter, ScoreStore},
};

const DEFAULT_TOP_N: usize = 10;
const DEFAULT_BUCKETS: usize = 10;

/// One point of a user's performance trend, numbered by attempt.
#[derive(Debug, Serialize)]
pub struct AttemptPoint {
    pub attempt: usize,
    pub subject: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user: String,
    pub attempts: Vec<AttemptPoint>,
    pub summary: Statistics,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub subject: Option<String>,
}

/// Returns one user's attempts oldest-first, with an attempt-numbered series
/// for the trend chart and a summary block. A user with no history gets an
/// empty list and the zero summary, not an error.
pub async fn history(
    State(scores): State<Arc<dyn ScoreStore>>,
    Path(user): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = scores
        .query(&ScoreFilter {
            user: Some(user.clone()),
            subject: params.subject,
        })
        .await?;

    let percentages: Vec<f64> = records.iter().map(|r| r.percentage).collect();
    let summary = engine::summarize(&percentages);

    let attempts = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| AttemptPoint {
            attempt: i + 1,
            subject: r.subject,
            score: r.score,
            total: r.total,
            percentage: r.percentage,
            taken_at: r.taken_at,
        })
        .collect();

    Ok(Json(HistoryResponse {
        user,
        attempts,
        summary,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub top_n: Option<usize>,
    pub subject: Option<String>,
}

/// Per-subject top-N ranking over the whole score history.
pub async fn leaderboard(
    State(scores): State<Arc<dyn ScoreStore>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = load_scores(&scores, params.subject).await?;
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_N).clamp(1, 100);

    let board: BTreeMap<String, Vec<LeaderboardEntry>> = engine::leaderboard(&records, top_n);
    Ok(Json(board))
}

#[derive(Debug, Deserialize)]
pub struct DistributionParams {
    pub buckets: Option<usize>,
    pub subject: Option<String>,
}

/// Per-subject score histogram over the whole score history.
pub async fn distribution(
    State(scores): State<Arc<dyn ScoreStore>>,
    Query(params): Query<DistributionParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = load_scores(&scores, params.subject).await?;
    let buckets = params.buckets.unwrap_or(DEFAULT_BUCKETS).clamp(1, 100);

    let histograms: BTreeMap<String, Vec<HistogramBucket>> =
        engine::distribution(&records, buckets);
    Ok(Json(histograms))
}

async fn load_scores(
    scores: &Arc<dyn ScoreStore>,
    subject: Option<String>,
) -> Result<Vec<ScoreRecord>, AppError> {
    scores
        .query(&ScoreFilter {
            user: None,
            subject,
        })
        .await
}
