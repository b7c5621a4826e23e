// src/tryout/scoring.rs

use std::collections::HashSet;

use crate::{
    models::{
        attempt::{AnswerSheet, AttemptDetail, ScoreResult},
        exam::{AssembledExam, BoundQuestion, PublicOption},
    },
    utils::html::clean_html,
};

/// Scores a submission against an assembled exam.
///
/// * Every option of every binding row counts toward `max_score`, correct or not.
///   A question bound twice therefore counts twice.
/// * An option is awarded iff the learner chose its label and it is flagged correct.
/// * `passed` compares the raw total against `passing_grade`; no grade means not passed.
/// * Details are emitted once per distinct question, in first-seen order.
pub fn score(exam: &AssembledExam, answers: &AnswerSheet, passing_grade: Option<i64>) -> ScoreResult {
    let mut total_score = 0;
    let mut max_score = 0;
    let mut details = Vec::new();
    let mut seen = HashSet::new();

    for question in &exam.questions {
        let chosen = answers.chosen(question.question_id);

        for option in &question.options {
            max_score += option.score;
            if option.is_correct && chosen == Some(option.label.as_str()) {
                total_score += option.score;
            }
        }

        if seen.insert(question.question_id) {
            details.push(detail(question, chosen));
        }
    }

    let percentage = if max_score > 0 {
        (total_score as f64 / max_score as f64) * 100.0
    } else {
        0.0
    };

    let passed = passing_grade.is_some_and(|grade| total_score >= grade);

    ScoreResult {
        total_score,
        max_score,
        percentage,
        passing_grade,
        passed,
        details,
    }
}

fn detail(question: &BoundQuestion, chosen: Option<&str>) -> AttemptDetail {
    // Only one key is exposed even when several options are flagged correct.
    let correct_label = question
        .options
        .iter()
        .find(|o| o.is_correct)
        .map(|o| o.label.clone());

    AttemptDetail {
        question_id: question.question_id,
        body: clean_html(&question.body),
        explanation: question.explanation.as_deref().map(clean_html),
        options: question.options.iter().map(PublicOption::from).collect(),
        chosen_label: chosen.map(str::to_string),
        correct_label,
    }
}
