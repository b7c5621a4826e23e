// src/handlers/tryout.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        attempt::{AnswerSheet, Attempt, ScoreResult, SubmitAnswersRequest},
        exam::{Exam, PresentedExam},
        leaderboard::{DashboardParams, DashboardResponse},
    },
    repository::Store,
    tryout,
    utils::jwt::Claims,
};

/// Lists the tryouts the current learner has purchased.
#[utoipa::path(
    get,
    path = "/api/user/tryout",
    responses((status = 200, description = "Purchased tryouts", body = [Exam])),
    tag = "tryout"
)]
pub async fn list_tryouts(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let learner_id = claims.learner_id()?;
    let exams = tryout::accessible_exams(store.as_ref(), learner_id).await?;

    Ok(Json(exams))
}

/// Returns a tryout with its questions and options, without the answer key.
#[utoipa::path(
    get,
    path = "/api/user/tryout/{id}",
    params(("id" = i64, Path, description = "Tryout id")),
    responses(
        (status = 200, description = "Tryout ready to sit", body = PresentedExam),
        (status = 404, description = "Tryout not found or not purchased")
    ),
    tag = "tryout"
)]
pub async fn get_tryout(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let learner_id = claims.learner_id()?;
    let exam = tryout::present_exam(store.as_ref(), learner_id, id).await?;

    Ok(Json(exam))
}

/// Submits answers, scores them and stores a new attempt.
///
/// Every call creates a new attempt; earlier attempts are never touched.
#[utoipa::path(
    post,
    path = "/api/user/tryout/{id}/submit",
    params(("id" = i64, Path, description = "Tryout id")),
    request_body = SubmitAnswersRequest,
    responses(
        (status = 200, description = "Scored and recorded", body = ScoreResult),
        (status = 400, description = "Missing answers"),
        (status = 404, description = "Tryout not found or not purchased")
    ),
    tag = "tryout"
)]
pub async fn submit_tryout(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let raw = req
        .answers
        .ok_or_else(|| AppError::BadRequest("Missing answers".to_string()))?;

    let learner_id = claims.learner_id()?;
    let answers = AnswerSheet::from_raw(&raw);
    if answers.len() < raw.len() {
        tracing::debug!(
            exam_id = id,
            ignored = raw.len() - answers.len(),
            "Ignoring malformed answer entries"
        );
    }

    let result = tryout::submit(store.as_ref(), learner_id, id, &answers).await?;

    Ok(Json(result))
}

/// Participant count, the caller's attempts and the leaderboard of a tryout.
#[utoipa::path(
    get,
    path = "/api/user/tryout/{id}/dashboard",
    params(("id" = i64, Path, description = "Tryout id"), DashboardParams),
    responses(
        (status = 200, description = "Tryout dashboard", body = DashboardResponse),
        (status = 400, description = "Invalid limit"),
        (status = 404, description = "Tryout not found or not purchased")
    ),
    tag = "tryout"
)]
pub async fn get_dashboard(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let learner_id = claims.learner_id()?;
    let limit = params.limit.map(|l| l as usize);
    let dashboard = tryout::dashboard(store.as_ref(), learner_id, id, limit).await?;

    Ok(Json(dashboard))
}

/// One of the caller's attempts with the per-question review.
#[utoipa::path(
    get,
    path = "/api/user/tryout/{id}/hasil/{attempt_id}",
    params(
        ("id" = i64, Path, description = "Tryout id"),
        ("attempt_id" = i64, Path, description = "Attempt id")
    ),
    responses(
        (status = 200, description = "Attempt with review details", body = Attempt),
        (status = 404, description = "Attempt not found")
    ),
    tag = "tryout"
)]
pub async fn get_attempt(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
    Path((id, attempt_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let learner_id = claims.learner_id()?;
    let attempt = tryout::attempt(store.as_ref(), learner_id, id, attempt_id).await?;

    Ok(Json(attempt))
}
