// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents the 'exams' table (a tryout).
///
/// Serialized with the field names the dashboard frontend already consumes.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Exam {
    pub id: i64,

    #[serde(rename = "judul_tryout")]
    pub title: String,

    pub slug: String,

    #[serde(rename = "deskripsi")]
    pub description: Option<String>,

    pub banner_image: Option<String>,

    /// Nominal duration. Only enforced by the client-side timer.
    #[serde(rename = "durasi")]
    pub duration_minutes: i32,
}

/// An answer option with its answer-key data.
/// Internal only: it has no `Serialize` impl, so it cannot leak into a response.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOption {
    /// Single uppercase letter, unique within its question.
    pub label: String,
    pub content: String,
    pub score: i64,
    pub is_correct: bool,
}

/// One question as bound to an exam.
///
/// An exam that binds the same question twice yields two `BoundQuestion`s.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuestion {
    pub question_id: i64,
    pub body: String,
    pub explanation: Option<String>,
    pub options: Vec<AnswerOption>,
}

/// Output of the exam assembler: the exam plus every binding row, in binding order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledExam {
    pub exam: Exam,
    pub questions: Vec<BoundQuestion>,
}

/// Learner-facing option: label and content only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicOption {
    pub label: String,
    #[serde(rename = "konten")]
    pub content: String,
}

/// Learner-facing question.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PublicQuestion {
    #[serde(rename = "bank_soal_id")]
    pub question_id: i64,
    #[serde(rename = "soal")]
    pub body: String,
    #[serde(rename = "opsi")]
    pub options: Vec<PublicOption>,
}

/// Response body of `GET /api/user/tryout/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PresentedExam {
    #[serde(flatten)]
    pub exam: Exam,
    #[serde(rename = "soal")]
    pub questions: Vec<PublicQuestion>,
    #[serde(rename = "passingGrade")]
    pub passing_grade: Option<i64>,
}
