// src/tryout/assembler.rs

use crate::{error::AppError, models::exam::AssembledExam, repository::QuestionBank};

/// Loads an exam with every bound question and its full answer key.
///
/// Reads the catalog fresh on every call. The result carries scores and
/// correctness flags and must never be returned to a learner as-is.
pub async fn assemble<B>(bank: &B, exam_id: i64) -> Result<AssembledExam, AppError>
where
    B: QuestionBank + ?Sized,
{
    let exam = bank
        .find_exam(exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tryout not found".to_string()))?;

    let questions = bank.bound_questions(exam_id).await?;

    Ok(AssembledExam { exam, questions })
}
