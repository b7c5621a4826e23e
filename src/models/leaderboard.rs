// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{attempt::AttemptSummary, exam::Exam};

/// One attempt joined with its learner, as read for ranking.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RankedAttempt {
    pub attempt_id: i64,
    pub user_id: i64,
    pub name: String,
    pub total_score: i64,
    pub max_score: i64,
    pub percentage: f64,
}

/// A leaderboard row: one learner, represented by their best attempt.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub name: String,
    pub total_score: i64,
    pub max_score: i64,
    pub percentage: f64,
}

impl From<RankedAttempt> for LeaderboardEntry {
    fn from(row: RankedAttempt) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            total_score: row.total_score,
            max_score: row.max_score,
            percentage: row.percentage,
        }
    }
}

/// Response body of `GET /api/user/tryout/{id}/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(rename = "tryout")]
    pub exam: Exam,
    /// Distinct learners with at least one attempt.
    #[serde(rename = "total_peserta")]
    pub total_participants: i64,
    /// The caller's own attempts, newest first.
    #[serde(rename = "attempts")]
    pub my_attempts: Vec<AttemptSummary>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// Keep only the top `limit` leaderboard rows.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}
