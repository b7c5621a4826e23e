// src/tryout/leaderboard.rs

use std::collections::HashSet;

use crate::models::leaderboard::{LeaderboardEntry, RankedAttempt};

/// Ranks learners by their best attempt.
///
/// Attempts are ordered by percentage descending, newest attempt first on ties;
/// the first attempt seen for each learner represents them. The survivors are
/// then ordered by percentage again (stable, numeric) and cut to `limit`.
pub fn rank(mut attempts: Vec<RankedAttempt>, limit: Option<usize>) -> Vec<LeaderboardEntry> {
    attempts.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then(b.attempt_id.cmp(&a.attempt_id))
    });

    let mut seen = HashSet::new();
    let mut best: Vec<RankedAttempt> = attempts
        .into_iter()
        .filter(|attempt| seen.insert(attempt.user_id))
        .collect();

    best.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    if let Some(limit) = limit {
        best.truncate(limit);
    }

    best.into_iter().map(LeaderboardEntry::from).collect()
}
