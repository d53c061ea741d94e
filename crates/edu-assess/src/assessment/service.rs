use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::students::domain::StudentId;
use crate::students::repository::StudentRepository;

use super::domain::{AssessmentAnswer, AssessmentResult, AssessmentResultView, MeasuredLevel, ResultId};
use super::recommendation::recommend;
use super::report::ReportData;
use super::repository::{NewAssessmentResult, RepositoryError, ResultRepository};
use super::scoring::{score_answers, ScoringError};

/// Wire shape of one submitted answer. The `is_correct` flag is accepted for
/// compatibility with existing clients but never trusted: correctness is
/// recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_option: usize,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

/// Aggregate view for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStats {
    pub total_results: usize,
    pub average_percentage: f32,
    pub level_distribution: Vec<LevelCount>,
    pub recent: Vec<AssessmentResultView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelCount {
    pub level: MeasuredLevel,
    pub count: usize,
}

/// Service composing the scorer, classifier, and recommendation engine with
/// the injected repositories and shared catalog.
pub struct AssessmentService<S, R> {
    students: Arc<S>,
    results: Arc<R>,
    catalog: Arc<Catalog>,
}

impl<S, R> AssessmentService<S, R>
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    pub fn new(students: Arc<S>, results: Arc<R>, catalog: Arc<Catalog>) -> Self {
        Self {
            students,
            results,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Grade and persist one attempt: verify the student, recompute
    /// correctness, score, classify, recommend, store.
    pub fn submit(
        &self,
        student_id: StudentId,
        answers: Vec<SubmittedAnswer>,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        let student = self
            .students
            .fetch(student_id)?
            .ok_or(AssessmentServiceError::StudentNotFound(student_id))?;

        let graded = self.grade(&answers)?;
        let summary = score_answers(&graded)?;
        let measured = MeasuredLevel::from_percentage(summary.percentage);
        let recommendations = recommend(&self.catalog, measured, student.declared_level)?;

        let record = self.results.insert(NewAssessmentResult {
            student_id,
            answers: graded,
            score: summary.correct,
            total_questions: summary.total,
            percentage: summary.percentage,
            measured_level: measured,
            declared_level: student.declared_level,
            recommendations,
            completed_at: Utc::now(),
        })?;

        info!(
            student = %student_id,
            result = %record.id,
            percentage = record.percentage,
            level = record.measured_level.label(),
            "assessment recorded"
        );

        Ok(record)
    }

    fn grade(
        &self,
        answers: &[SubmittedAnswer],
    ) -> Result<Vec<AssessmentAnswer>, AssessmentServiceError> {
        if answers.is_empty() {
            return Err(ScoringError::EmptyAnswerSheet.into());
        }

        let mut graded = Vec::with_capacity(answers.len());
        for answer in answers {
            let question = self.catalog.question(&answer.question_id).map_err(|_| {
                AssessmentServiceError::UnknownQuestion(answer.question_id.clone())
            })?;
            if answer.selected_option >= question.options.len() {
                return Err(AssessmentServiceError::OptionOutOfRange {
                    question_id: answer.question_id.clone(),
                    selected_option: answer.selected_option,
                });
            }

            let correct = answer.selected_option == question.correct_option;
            if let Some(claimed) = answer.is_correct {
                if claimed != correct {
                    warn!(
                        question = %answer.question_id,
                        claimed,
                        recomputed = correct,
                        "client-sent correctness flag disagrees with catalog"
                    );
                }
            }

            graded.push(AssessmentAnswer {
                question_id: answer.question_id.clone(),
                selected_option: answer.selected_option,
                correct,
            });
        }
        Ok(graded)
    }

    pub fn result(&self, id: ResultId) -> Result<AssessmentResult, AssessmentServiceError> {
        self.results
            .fetch(id)?
            .ok_or(AssessmentServiceError::ResultNotFound(id))
    }

    pub fn results_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<AssessmentResult>, AssessmentServiceError> {
        Ok(self.results.for_student(student_id)?)
    }

    /// Everything the report formatter needs for one stored result.
    pub fn report_data(&self, id: ResultId) -> Result<ReportData, AssessmentServiceError> {
        let result = self.result(id)?;
        let student = self
            .students
            .fetch(result.student_id)?
            .ok_or(AssessmentServiceError::StudentNotFound(result.student_id))?;
        Ok(ReportData { student, result })
    }

    pub fn stats(&self) -> Result<AssessmentStats, AssessmentServiceError> {
        let mut all = self.results.all()?;
        all.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let total_results = all.len();
        let average_percentage = if all.is_empty() {
            0.0
        } else {
            all.iter().map(|result| result.percentage).sum::<f32>() / total_results as f32
        };

        let level_distribution = [
            MeasuredLevel::Beginner,
            MeasuredLevel::Intermediate,
            MeasuredLevel::Advanced,
        ]
        .into_iter()
        .map(|level| LevelCount {
            level,
            count: all
                .iter()
                .filter(|result| result.measured_level == level)
                .count(),
        })
        .collect();

        let recent = all
            .iter()
            .take(10)
            .map(AssessmentResult::view)
            .collect();

        Ok(AssessmentStats {
            total_results,
            average_percentage,
            level_distribution,
            recent,
        })
    }

    /// Build a graded submission for a fully-correct sheet; used by the demo
    /// and by tests that need a deterministic perfect run.
    pub fn perfect_sheet(&self) -> Vec<SubmittedAnswer> {
        self.catalog
            .questions()
            .iter()
            .map(|question| SubmittedAnswer {
                question_id: question.id.clone(),
                selected_option: question.correct_option,
                is_correct: None,
            })
            .collect()
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("assessment result {0} not found")]
    ResultNotFound(ResultId),
    #[error("answer references unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("selected option {selected_option} is out of range for question '{question_id}'")]
    OptionOutOfRange {
        question_id: String,
        selected_option: usize,
    },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AssessmentServiceError {
    /// Invalid submissions are client errors; everything else is not.
    pub fn is_invalid_submission(&self) -> bool {
        matches!(
            self,
            AssessmentServiceError::UnknownQuestion(_)
                | AssessmentServiceError::OptionOutOfRange { .. }
                | AssessmentServiceError::Scoring(_)
        )
    }
}
