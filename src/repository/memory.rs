// src/repository/memory.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        attempt::{Attempt, AttemptSummary, ScoreResult},
        exam::{AnswerOption, BoundQuestion, Exam},
        leaderboard::RankedAttempt,
    },
    repository::{AccessPolicy, AttemptStore, QuestionBank},
};

struct StoredQuestion {
    question_type_id: i64,
    body: String,
    explanation: Option<String>,
    options: Vec<AnswerOption>,
}

struct Binding {
    id: i64,
    exam_id: i64,
    question_id: i64,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    learners: HashMap<i64, String>,
    /// question type id -> passing grade
    question_types: HashMap<i64, i64>,
    questions: HashMap<i64, StoredQuestion>,
    exams: BTreeMap<i64, Exam>,
    bindings: Vec<Binding>,
    /// (learner id, exam id) pairs with a successful purchase.
    grants: HashSet<(i64, i64)>,
    attempts: Vec<Attempt>,
}

impl MemoryState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn bindings_of(&self, exam_id: i64) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.exam_id == exam_id)
    }
}

/// Process-local store with the same observable behavior as `PgStore`.
///
/// Ids come from one increasing counter, so a later attempt always has a
/// larger id than an earlier one.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_learner(&self, name: &str) -> i64 {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        state.learners.insert(id, name.to_string());
        id
    }

    pub async fn add_question_type(&self, passing_grade: i64) -> i64 {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        state.question_types.insert(id, passing_grade);
        id
    }

    pub async fn add_question(
        &self,
        question_type_id: i64,
        body: &str,
        explanation: Option<&str>,
        mut options: Vec<AnswerOption>,
    ) -> i64 {
        options.sort_by(|a, b| a.label.cmp(&b.label));
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        state.questions.insert(
            id,
            StoredQuestion {
                question_type_id,
                body: body.to_string(),
                explanation: explanation.map(str::to_string),
                options,
            },
        );
        id
    }

    pub async fn add_exam(&self, title: &str, duration_minutes: i32) -> i64 {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let slug = title.trim().to_lowercase().replace(' ', "-");
        state.exams.insert(
            id,
            Exam {
                id,
                title: title.to_string(),
                slug,
                description: None,
                banner_image: None,
                duration_minutes,
            },
        );
        id
    }

    /// Binds a question to an exam. Binding the same question twice is allowed.
    pub async fn bind_question(&self, exam_id: i64, question_id: i64) -> i64 {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        state.bindings.push(Binding {
            id,
            exam_id,
            question_id,
        });
        id
    }

    /// Records a successful purchase of a package bundling `exam_id`.
    pub async fn grant_access(&self, learner_id: i64, exam_id: i64) {
        self.state.write().await.grants.insert((learner_id, exam_id));
    }
}

#[async_trait]
impl QuestionBank for MemoryStore {
    async fn find_exam(&self, exam_id: i64) -> Result<Option<Exam>, AppError> {
        Ok(self.state.read().await.exams.get(&exam_id).cloned())
    }

    async fn bound_questions(&self, exam_id: i64) -> Result<Vec<BoundQuestion>, AppError> {
        let state = self.state.read().await;
        let questions = state
            .bindings_of(exam_id)
            .filter_map(|binding| {
                let stored = state.questions.get(&binding.question_id)?;
                Some(BoundQuestion {
                    question_id: binding.question_id,
                    body: stored.body.clone(),
                    explanation: stored.explanation.clone(),
                    options: stored.options.clone(),
                })
            })
            .collect();
        Ok(questions)
    }

    async fn passing_grade(&self, exam_id: i64) -> Result<Option<i64>, AppError> {
        let state = self.state.read().await;
        let grade = state
            .bindings_of(exam_id)
            .filter_map(|binding| state.questions.get(&binding.question_id))
            .find_map(|q| state.question_types.get(&q.question_type_id).copied());
        Ok(grade)
    }
}

#[async_trait]
impl AccessPolicy for MemoryStore {
    async fn has_active_access(&self, learner_id: i64, exam_id: i64) -> Result<bool, AppError> {
        Ok(self.state.read().await.grants.contains(&(learner_id, exam_id)))
    }

    async fn accessible_exams(&self, learner_id: i64) -> Result<Vec<Exam>, AppError> {
        let state = self.state.read().await;
        let exams = state
            .exams
            .values()
            .filter(|exam| state.grants.contains(&(learner_id, exam.id)))
            .cloned()
            .collect();
        Ok(exams)
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn record(
        &self,
        learner_id: i64,
        exam_id: i64,
        result: &ScoreResult,
    ) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        if !state.learners.contains_key(&learner_id) {
            return Err(AppError::InternalServerError(format!(
                "Unknown learner {}",
                learner_id
            )));
        }

        let id = state.allocate_id();
        state.attempts.push(Attempt {
            id,
            learner_id,
            exam_id,
            total_score: result.total_score,
            max_score: result.max_score,
            percentage: result.percentage,
            passed: result.passed,
            details: Json(result.details.clone()),
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn history(
        &self,
        learner_id: i64,
        exam_id: i64,
    ) -> Result<Vec<AttemptSummary>, AppError> {
        let state = self.state.read().await;
        let mut attempts: Vec<AttemptSummary> = state
            .attempts
            .iter()
            .filter(|a| a.learner_id == learner_id && a.exam_id == exam_id)
            .map(AttemptSummary::from)
            .collect();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(attempts)
    }

    async fn find(&self, attempt_id: i64) -> Result<Option<Attempt>, AppError> {
        let state = self.state.read().await;
        Ok(state.attempts.iter().find(|a| a.id == attempt_id).cloned())
    }

    async fn participant_count(&self, exam_id: i64) -> Result<i64, AppError> {
        let state = self.state.read().await;
        let learners: HashSet<i64> = state
            .attempts
            .iter()
            .filter(|a| a.exam_id == exam_id)
            .map(|a| a.learner_id)
            .collect();
        Ok(learners.len() as i64)
    }

    async fn exam_attempts(&self, exam_id: i64) -> Result<Vec<RankedAttempt>, AppError> {
        let state = self.state.read().await;
        let rows = state
            .attempts
            .iter()
            .filter(|a| a.exam_id == exam_id)
            .filter_map(|a| {
                let name = state.learners.get(&a.learner_id)?;
                Some(RankedAttempt {
                    attempt_id: a.id,
                    user_id: a.learner_id,
                    name: name.clone(),
                    total_score: a.total_score,
                    max_score: a.max_score,
                    percentage: a.percentage,
                })
            })
            .collect();
        Ok(rows)
    }
}
