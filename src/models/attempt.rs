// src/models/attempt.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;

use crate::models::exam::PublicOption;

/// Per-question outcome, frozen into the attempt at submission time so that
/// the review ("pembahasan") stays reproducible after catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttemptDetail {
    #[serde(rename = "bank_soal_id")]
    pub question_id: i64,

    #[serde(rename = "soal")]
    pub body: String,

    #[serde(rename = "pembahasan")]
    pub explanation: Option<String>,

    #[serde(rename = "opsi")]
    pub options: Vec<PublicOption>,

    /// Label the learner picked, if any.
    #[serde(rename = "jawaban_user")]
    pub chosen_label: Option<String>,

    /// Label of the first option flagged correct, if any.
    #[serde(rename = "jawaban_benar")]
    pub correct_label: Option<String>,
}

/// Result of scoring one submission. Also the response body of the submit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScoreResult {
    #[serde(rename = "totalScore")]
    pub total_score: i64,
    #[serde(rename = "maxScore")]
    pub max_score: i64,
    pub percentage: f64,
    #[serde(rename = "passingGrade")]
    pub passing_grade: Option<i64>,
    #[serde(rename = "lulus")]
    pub passed: bool,
    pub details: Vec<AttemptDetail>,
}

/// Represents the 'exam_attempts' table. Written once, never updated.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Attempt {
    pub id: i64,

    #[serde(skip)]
    #[sqlx(rename = "user_id")]
    pub learner_id: i64,

    #[serde(skip)]
    pub exam_id: i64,

    pub total_score: i64,
    pub max_score: i64,
    pub percentage: f64,

    #[serde(rename = "lulus")]
    pub passed: bool,

    #[schema(value_type = Vec<AttemptDetail>)]
    pub details: Json<Vec<AttemptDetail>>,

    #[schema(value_type = String)]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// History row: an attempt without its detail snapshot.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct AttemptSummary {
    pub id: i64,
    pub total_score: i64,
    pub max_score: i64,
    pub percentage: f64,
    #[serde(rename = "lulus")]
    pub passed: bool,
    #[schema(value_type = String)]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Attempt> for AttemptSummary {
    fn from(attempt: &Attempt) -> Self {
        Self {
            id: attempt.id,
            total_score: attempt.total_score,
            max_score: attempt.max_score,
            percentage: attempt.percentage,
            passed: attempt.passed,
            created_at: attempt.created_at,
        }
    }
}

/// DTO for submitting tryout answers.
///
/// `answers` maps question ids (as JSON object keys) to the chosen option label.
/// It is kept loosely typed here and narrowed by [`AnswerSheet::from_raw`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAnswersRequest {
    #[schema(value_type = Object)]
    pub answers: Option<HashMap<String, serde_json::Value>>,
}

/// A learner's submission: question id -> chosen option label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet(HashMap<i64, String>);

impl AnswerSheet {
    /// Narrows a raw answer object.
    ///
    /// A key must be the canonical decimal form of a question id (`"01"`,
    /// `" 1"` and `"+1"` are not id 1). Other keys, values that are not
    /// strings and empty strings are dropped; a dropped entry reads as
    /// "no answer".
    pub fn from_raw(raw: &HashMap<String, serde_json::Value>) -> Self {
        let answers = raw
            .iter()
            .filter_map(|(key, value)| {
                let question_id = key.parse::<i64>().ok().filter(|id| id.to_string() == *key)?;
                let label = value.as_str().filter(|s| !s.is_empty())?;
                Some((question_id, label.to_string()))
            })
            .collect();
        Self(answers)
    }

    /// The label chosen for `question_id`, if the learner answered it.
    pub fn chosen(&self, question_id: i64) -> Option<&str> {
        self.0.get(&question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(i64, String)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
