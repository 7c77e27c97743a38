// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, QuestionBank, UpdateQuestionRequest},
    store::{QuestionStore, ScoreFilter, ScoreStore},
};

/// Dumps the whole question bank in its canonical form:
/// subject -> ordered questions, correct indices included.
pub async fn list_questions(
    State(questions): State<Arc<dyn QuestionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let mut bank = QuestionBank::new();
    for subject in questions.list_subjects().await? {
        let key = questions.answer_key(&subject).await?;
        bank.insert(key.subject, key.questions);
    }
    Ok(Json(bank))
}

/// Adds a question to the bank.
pub async fn create_question(
    State(questions): State<Arc<dyn QuestionStore>>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if payload.correct_index >= payload.options.len() {
        return Err(AppError::BadRequest(format!(
            "correct_index {} does not address one of the {} options",
            payload.correct_index,
            payload.options.len()
        )));
    }

    questions
        .add_question(
            &payload.subject,
            &Question {
                text: payload.text,
                options: payload.options,
                correct_index: payload.correct_index,
            },
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// Replaces the question at `index` within a subject, keeping its position.
pub async fn update_question(
    State(questions): State<Arc<dyn QuestionStore>>,
    Path((subject, index)): Path<(String, usize)>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if payload.correct_index >= payload.options.len() {
        return Err(AppError::BadRequest(format!(
            "correct_index {} does not address one of the {} options",
            payload.correct_index,
            payload.options.len()
        )));
    }

    let updated = questions
        .update_question(
            &subject,
            index,
            &Question {
                text: payload.text,
                options: payload.options,
                correct_index: payload.correct_index,
            },
        )
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!(
            "No question {} in subject '{}'",
            index, subject
        )));
    }

    tracing::info!(%subject, index, "question updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes the question at `index` within a subject.
pub async fn delete_question(
    State(questions): State<Arc<dyn QuestionStore>>,
    Path((subject, index)): Path<(String, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = questions.delete_question(&subject, index).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "No question {} in subject '{}'",
            index, subject
        )));
    }

    tracing::info!(%subject, index, "question deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ClearScoresParams {
    pub user: Option<String>,
    pub subject: Option<String>,
}

/// Clears score history by filter. With no filter at all this resets the
/// whole history, mirroring the admin "reset all scores" action.
pub async fn clear_scores(
    State(scores): State<Arc<dyn ScoreStore>>,
    Query(params): Query<ClearScoresParams>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = scores
        .delete(&ScoreFilter {
            user: params.user,
            subject: params.subject,
        })
        .await?;

    tracing::info!(deleted, "score records cleared");
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
