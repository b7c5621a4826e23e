// src/tryout/presenter.rs

use crate::{
    models::exam::{AnswerOption, AssembledExam, BoundQuestion, PresentedExam, PublicOption, PublicQuestion},
    utils::html::clean_html,
};

impl From<&AnswerOption> for PublicOption {
    fn from(option: &AnswerOption) -> Self {
        Self {
            label: option.label.clone(),
            content: clean_html(&option.content),
        }
    }
}

impl From<&BoundQuestion> for PublicQuestion {
    fn from(question: &BoundQuestion) -> Self {
        Self {
            question_id: question.question_id,
            body: clean_html(&question.body),
            options: question.options.iter().map(PublicOption::from).collect(),
        }
    }
}

/// Builds the learner view of an exam: one entry per binding, options without
/// scores or correctness.
pub fn present(assembled: AssembledExam, passing_grade: Option<i64>) -> PresentedExam {
    let questions = assembled.questions.iter().map(PublicQuestion::from).collect();

    PresentedExam {
        exam: assembled.exam,
        questions,
        passing_grade,
    }
}
