use serde::{Deserialize, Serialize};

use super::domain::AssessmentAnswer;

/// Aggregate score for one attempt. `percentage` carries the rounded value;
/// it is what gets stored, displayed, and classified, so the three always
/// agree by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct: u32,
    pub total: u32,
    pub percentage: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("assessment submitted without any answers")]
    EmptyAnswerSheet,
}

/// Count correct answers and compute the rounded percentage. An empty sheet
/// is rejected so the division can never silently produce a NaN.
pub fn score_answers(answers: &[AssessmentAnswer]) -> Result<ScoreSummary, ScoringError> {
    if answers.is_empty() {
        return Err(ScoringError::EmptyAnswerSheet);
    }

    let correct = answers.iter().filter(|answer| answer.correct).count() as u32;
    let total = answers.len() as u32;
    let percentage = (correct as f32 / total as f32 * 100.0).round();

    Ok(ScoreSummary {
        correct,
        total,
        percentage,
    })
}
