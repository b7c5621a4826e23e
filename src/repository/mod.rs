// src/repository/mod.rs

//! Storage seams of the tryout core.
//!
//! The core reads the catalog through [`QuestionBank`], asks the commerce side
//! for purchase state through [`AccessPolicy`] and appends results through
//! [`AttemptStore`]. [`postgres::PgStore`] backs all three in production,
//! [`memory::MemoryStore`] in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        attempt::{Attempt, AttemptSummary, ScoreResult},
        exam::{BoundQuestion, Exam},
        leaderboard::RankedAttempt,
    },
};

/// Read-only view of the question bank.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn find_exam(&self, exam_id: i64) -> Result<Option<Exam>, AppError>;

    /// Every binding row of the exam in binding order, each with all options
    /// (answer key included) ordered by label.
    async fn bound_questions(&self, exam_id: i64) -> Result<Vec<BoundQuestion>, AppError>;

    /// Passing grade of the question type of the first bound question.
    async fn passing_grade(&self, exam_id: i64) -> Result<Option<i64>, AppError>;
}

/// Purchase state owned by the commerce side.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// True if the learner holds a successful transaction for a package bundling the exam.
    async fn has_active_access(&self, learner_id: i64, exam_id: i64) -> Result<bool, AppError>;

    async fn accessible_exams(&self, learner_id: i64) -> Result<Vec<Exam>, AppError>;
}

/// Append-only attempt log.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Inserts a new attempt and returns its id. Never merges with earlier attempts.
    async fn record(
        &self,
        learner_id: i64,
        exam_id: i64,
        result: &ScoreResult,
    ) -> Result<i64, AppError>;

    /// The learner's attempts on one exam, newest first.
    async fn history(&self, learner_id: i64, exam_id: i64)
        -> Result<Vec<AttemptSummary>, AppError>;

    async fn find(&self, attempt_id: i64) -> Result<Option<Attempt>, AppError>;

    /// Number of distinct learners with at least one attempt.
    async fn participant_count(&self, exam_id: i64) -> Result<i64, AppError>;

    /// All attempts on the exam joined with learner names.
    async fn exam_attempts(&self, exam_id: i64) -> Result<Vec<RankedAttempt>, AppError>;
}

/// Everything the HTTP layer needs from storage.
pub trait Store: QuestionBank + AccessPolicy + AttemptStore {}

impl<T> Store for T where T: QuestionBank + AccessPolicy + AttemptStore {}
