// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers,
    models::{
        attempt::{Attempt, AttemptDetail, AttemptSummary, ScoreResult, SubmitAnswersRequest},
        exam::{Exam, PresentedExam, PublicOption, PublicQuestion},
        leaderboard::{DashboardResponse, LeaderboardEntry},
    },
};

/// OpenAPI description of the learner-facing tryout API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::tryout::list_tryouts,
        handlers::tryout::get_tryout,
        handlers::tryout::submit_tryout,
        handlers::tryout::get_dashboard,
        handlers::tryout::get_attempt,
    ),
    components(schemas(
        Exam,
        PresentedExam,
        PublicQuestion,
        PublicOption,
        SubmitAnswersRequest,
        ScoreResult,
        AttemptDetail,
        Attempt,
        AttemptSummary,
        DashboardResponse,
        LeaderboardEntry,
    )),
    tags(
        (name = "tryout", description = "Timed exams: sitting, scoring, history and leaderboard"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
