// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One multiple-choice question: prompt, ordered options and the index of the
/// correct option. Immutable once loaded for a quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,

    /// Ordered list of options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_index: usize,
}

/// The full question set for one subject, used to grade an attempt.
/// Fetched fresh from the question store at the start of each attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerKey {
    pub subject: String,
    pub questions: Vec<Question>,
}

impl AnswerKey {
    /// An absent subject is signalled by a key with zero questions,
    /// not by an error.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Canonical on-the-wire form of the whole question bank:
/// subject name -> ordered question list. Round-trips exactly through
/// serde_json, so it doubles as the seed-file format.
pub type QuestionBank = BTreeMap<String, Vec<Question>>;

/// DTO for sending a question to a quiz-taker (excludes the correct index).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// DTO for replacing an existing question. The subject and position come
/// from the URL; a question cannot move between subjects by editing.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_index: usize,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("need_at_least_two_options"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("option_length_invalid"));
        }
    }
    Ok(())
}
