// src/handlers/quiz.rs

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    engine::{self, SubmittedAnswers},
    error::AppError,
    models::{
        question::PublicQuestion,
        score::ScoreRecord,
    },
    state::AppState,
    store::QuestionStore,
};

/// Lists every subject that currently has questions.
pub async fn list_subjects(
    State(questions): State<Arc<dyn QuestionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = questions.list_subjects().await?;
    Ok(Json(subjects))
}

/// DTO for one attempt's paper: the questions with correct indices stripped.
#[derive(Debug, Serialize)]
pub struct PaperResponse {
    pub subject: String,
    pub questions: Vec<PublicQuestion>,
}

/// Serves the question paper for one subject.
/// A subject with no questions is reported as 404 rather than an empty quiz.
pub async fn get_paper(
    State(questions): State<Arc<dyn QuestionStore>>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let key = questions.answer_key(&subject).await?;
    if key.is_empty() {
        return Err(AppError::NotFound(format!(
            "No questions available for '{}'",
            subject
        )));
    }

    Ok(Json(PaperResponse {
        questions: key.questions.iter().map(PublicQuestion::from).collect(),
        subject: key.subject,
    }))
}

/// DTO for submitting a quiz attempt.
///
/// `answers` maps question index to selected option index, both arriving as
/// untrusted form values. Malformed entries are dropped, not rejected: a
/// submission must never fail to grade.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, max = 50))]
    pub user: String,

    #[serde(default)]
    pub answers: HashMap<String, serde_json::Value>,

    /// Optional per-question elapsed seconds, in question order.
    #[serde(default)]
    pub elapsed_seconds: Vec<f64>,
}

/// Coerces one submitted index, accepting both JSON numbers and the string
/// form an HTML select posts.
fn parse_index(value: &serde_json::Value) -> Option<usize> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Grades a submitted attempt and appends the outcome to the score history.
pub async fn submit_paper(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let key = state.questions.answer_key(&subject).await?;
    if key.is_empty() {
        return Err(AppError::NotFound(format!(
            "No questions available for '{}'",
            subject
        )));
    }

    let mut submitted = SubmittedAnswers {
        elapsed_seconds: req.elapsed_seconds,
        ..Default::default()
    };
    for (question, choice) in &req.answers {
        if let (Ok(q), Some(picked)) = (question.trim().parse::<usize>(), parse_index(choice)) {
            submitted.selected.insert(q, picked);
        }
    }

    let result = engine::evaluate(&key, &submitted);

    state
        .scores
        .append(&ScoreRecord {
            user: req.user.clone(),
            subject: key.subject.clone(),
            score: result.score as i64,
            total: result.total as i64,
            percentage: result.percentage,
            taken_at: chrono::Utc::now(),
        })
        .await?;

    tracing::info!(
        user = %req.user,
        subject = %key.subject,
        score = result.score,
        total = result.total,
        "attempt graded"
    );

    Ok(Json(result))
}
