// src/tryout/mod.rs

//! Tryout core: assemble, present, score, record and rank.
//!
//! Every entry point takes the learner id supplied by the identity layer and
//! checks purchase state first. An unpurchased exam is reported exactly like a
//! missing one.

pub mod assembler;
pub mod leaderboard;
pub mod presenter;
pub mod scoring;

use crate::{
    error::AppError,
    models::{
        attempt::{AnswerSheet, Attempt, ScoreResult},
        exam::{Exam, PresentedExam},
        leaderboard::DashboardResponse,
    },
    repository::{AccessPolicy, Store},
};

async fn ensure_access<A>(access: &A, learner_id: i64, exam_id: i64) -> Result<(), AppError>
where
    A: AccessPolicy + ?Sized,
{
    if access.has_active_access(learner_id, exam_id).await? {
        Ok(())
    } else {
        tracing::debug!(learner_id, exam_id, "Tryout access denied");
        Err(AppError::NotFound("Tryout not found".to_string()))
    }
}

/// Exams the learner has bought through any package.
pub async fn accessible_exams<S>(store: &S, learner_id: i64) -> Result<Vec<Exam>, AppError>
where
    S: Store + ?Sized,
{
    store.accessible_exams(learner_id).await
}

/// Learner view of an exam, answer key removed.
pub async fn present_exam<S>(store: &S, learner_id: i64, exam_id: i64) -> Result<PresentedExam, AppError>
where
    S: Store + ?Sized,
{
    ensure_access(store, learner_id, exam_id).await?;

    let assembled = assembler::assemble(store, exam_id).await?;
    let passing_grade = store.passing_grade(exam_id).await?;

    Ok(presenter::present(assembled, passing_grade))
}

/// Scores a submission and records it as a new attempt.
///
/// The result is only returned once the attempt is stored.
pub async fn submit<S>(
    store: &S,
    learner_id: i64,
    exam_id: i64,
    answers: &AnswerSheet,
) -> Result<ScoreResult, AppError>
where
    S: Store + ?Sized,
{
    ensure_access(store, learner_id, exam_id).await?;

    let assembled = assembler::assemble(store, exam_id).await?;
    let passing_grade = store.passing_grade(exam_id).await?;

    let result = scoring::score(&assembled, answers, passing_grade);
    let attempt_id = store.record(learner_id, exam_id, &result).await?;

    tracing::info!(
        learner_id,
        exam_id,
        attempt_id,
        total_score = result.total_score,
        max_score = result.max_score,
        passed = result.passed,
        "Tryout attempt recorded"
    );

    Ok(result)
}

/// Participant count, the learner's own history and the leaderboard.
pub async fn dashboard<S>(
    store: &S,
    learner_id: i64,
    exam_id: i64,
    limit: Option<usize>,
) -> Result<DashboardResponse, AppError>
where
    S: Store + ?Sized,
{
    ensure_access(store, learner_id, exam_id).await?;

    let exam = store
        .find_exam(exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tryout not found".to_string()))?;

    let total_participants = store.participant_count(exam_id).await?;
    let my_attempts = store.history(learner_id, exam_id).await?;
    let leaderboard = leaderboard::rank(store.exam_attempts(exam_id).await?, limit);

    Ok(DashboardResponse {
        exam,
        total_participants,
        my_attempts,
        leaderboard,
    })
}

/// One attempt with its review details, scoped to its owner and exam.
pub async fn attempt<S>(
    store: &S,
    learner_id: i64,
    exam_id: i64,
    attempt_id: i64,
) -> Result<Attempt, AppError>
where
    S: Store + ?Sized,
{
    ensure_access(store, learner_id, exam_id).await?;

    let attempt = store
        .find(attempt_id)
        .await?
        .filter(|a| a.exam_id == exam_id)
        .ok_or_else(|| AppError::NotFound("Hasil tidak ditemukan".to_string()))?;

    if attempt.learner_id != learner_id {
        return Err(AppError::Forbidden(format!(
            "attempt {} requested by learner {}",
            attempt_id, learner_id
        )));
    }

    Ok(attempt)
}
