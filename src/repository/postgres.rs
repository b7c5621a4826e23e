// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        attempt::{Attempt, AttemptSummary, ScoreResult},
        exam::{AnswerOption, BoundQuestion, Exam},
        leaderboard::RankedAttempt,
    },
    repository::{AccessPolicy, AttemptStore, QuestionBank},
};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row of `exam_questions x questions x answer_options`.
/// Option columns are NULL for a question without options.
#[derive(Debug, FromRow)]
struct BindingRow {
    binding_id: i64,
    question_id: i64,
    body: String,
    explanation: Option<String>,
    label: Option<String>,
    content: Option<String>,
    score: Option<i64>,
    is_correct: Option<bool>,
}

/// Folds consecutive rows of the same binding into one `BoundQuestion`.
/// Rows must be ordered by binding id.
fn group_binding_rows(rows: Vec<BindingRow>) -> Vec<BoundQuestion> {
    let mut questions: Vec<BoundQuestion> = Vec::new();
    let mut current_binding = None;

    for row in rows {
        if current_binding != Some(row.binding_id) {
            current_binding = Some(row.binding_id);
            questions.push(BoundQuestion {
                question_id: row.question_id,
                body: row.body,
                explanation: row.explanation,
                options: Vec::new(),
            });
        }

        if let (Some(label), Some(question)) = (row.label, questions.last_mut()) {
            question.options.push(AnswerOption {
                label,
                content: row.content.unwrap_or_default(),
                score: row.score.unwrap_or(0),
                is_correct: row.is_correct.unwrap_or(false),
            });
        }
    }

    questions
}

#[async_trait]
impl QuestionBank for PgStore {
    async fn find_exam(&self, exam_id: i64) -> Result<Option<Exam>, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            SELECT id, title, slug, description, banner_image, duration_minutes
            FROM exams
            WHERE id = $1
            "#,
        )
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    async fn bound_questions(&self, exam_id: i64) -> Result<Vec<BoundQuestion>, AppError> {
        let rows = sqlx::query_as::<_, BindingRow>(
            r#"
            SELECT
                eq.id AS binding_id,
                q.id AS question_id,
                q.body,
                q.explanation,
                o.label,
                o.content,
                o.score,
                o.is_correct
            FROM exam_questions eq
            JOIN questions q ON q.id = eq.question_id
            LEFT JOIN answer_options o ON o.question_id = q.id
            WHERE eq.exam_id = $1
            ORDER BY eq.id ASC, o.label ASC
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch bound questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(group_binding_rows(rows))
    }

    async fn passing_grade(&self, exam_id: i64) -> Result<Option<i64>, AppError> {
        let grade = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT qt.passing_grade
            FROM exam_questions eq
            JOIN questions q ON q.id = eq.question_id
            JOIN question_types qt ON qt.id = q.question_type_id
            WHERE eq.exam_id = $1
            ORDER BY eq.id ASC
            LIMIT 1
            "#,
        )
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grade)
    }
}

#[async_trait]
impl AccessPolicy for PgStore {
    async fn has_active_access(&self, learner_id: i64, exam_id: i64) -> Result<bool, AppError> {
        let allowed = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM transactions t
                JOIN package_exams pe ON pe.package_id = t.package_id
                WHERE t.user_id = $1 AND t.status = 'success' AND pe.exam_id = $2
            )
            "#,
        )
        .bind(learner_id)
        .bind(exam_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check exam access: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(allowed)
    }

    async fn accessible_exams(&self, learner_id: i64) -> Result<Vec<Exam>, AppError> {
        let exams = sqlx::query_as::<_, Exam>(
            r#"
            SELECT DISTINCT e.id, e.title, e.slug, e.description, e.banner_image, e.duration_minutes
            FROM transactions t
            JOIN package_exams pe ON pe.package_id = t.package_id
            JOIN exams e ON e.id = pe.exam_id
            WHERE t.user_id = $1 AND t.status = 'success'
            ORDER BY e.id ASC
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }
}

#[async_trait]
impl AttemptStore for PgStore {
    async fn record(
        &self,
        learner_id: i64,
        exam_id: i64,
        result: &ScoreResult,
    ) -> Result<i64, AppError> {
        // Single statement: the attempt is either fully written or not at all.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO exam_attempts
                (user_id, exam_id, total_score, max_score, percentage, passed, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(learner_id)
        .bind(exam_id)
        .bind(result.total_score)
        .bind(result.max_score)
        .bind(result.percentage)
        .bind(result.passed)
        .bind(Json(&result.details))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert exam attempt: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(id)
    }

    async fn history(
        &self,
        learner_id: i64,
        exam_id: i64,
    ) -> Result<Vec<AttemptSummary>, AppError> {
        let attempts = sqlx::query_as::<_, AttemptSummary>(
            r#"
            SELECT id, total_score, max_score, percentage, passed, created_at
            FROM exam_attempts
            WHERE exam_id = $1 AND user_id = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(exam_id)
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }

    async fn find(&self, attempt_id: i64) -> Result<Option<Attempt>, AppError> {
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"
            SELECT id, user_id, exam_id, total_score, max_score, percentage, passed, details, created_at
            FROM exam_attempts
            WHERE id = $1
            "#,
        )
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attempt)
    }

    async fn participant_count(&self, exam_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM exam_attempts WHERE exam_id = $1",
        )
        .bind(exam_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn exam_attempts(&self, exam_id: i64) -> Result<Vec<RankedAttempt>, AppError> {
        let rows = sqlx::query_as::<_, RankedAttempt>(
            r#"
            SELECT
                h.id AS attempt_id,
                h.user_id,
                u.name,
                h.total_score,
                h.max_score,
                h.percentage
            FROM exam_attempts h
            JOIN users u ON u.id = h.user_id
            WHERE h.exam_id = $1
            ORDER BY h.percentage DESC, h.id DESC
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch exam attempts: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(rows)
    }
}
