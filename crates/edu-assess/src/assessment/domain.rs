use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Course, CourseLevel};
use crate::students::domain::{DeclaredLevel, StudentId};

/// Identifier assigned to a stored assessment result by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultId(pub i64);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Skill level derived purely from the score percentage.
///
/// The 60/80 thresholds are load-bearing: stored historical results were
/// classified with them and must keep agreeing with this function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasuredLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl MeasuredLevel {
    /// Total over all inputs; brackets are inclusive on their lower bound.
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 80.0 {
            MeasuredLevel::Advanced
        } else if percentage >= 60.0 {
            MeasuredLevel::Intermediate
        } else {
            MeasuredLevel::Beginner
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MeasuredLevel::Beginner => "BEGINNER",
            MeasuredLevel::Intermediate => "INTERMEDIATE",
            MeasuredLevel::Advanced => "ADVANCED",
        }
    }
}

/// One graded answer within an attempt. `correct` is derived from the catalog
/// and must equal `selected_option == question.correct_option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAnswer {
    pub question_id: String,
    pub selected_option: usize,
    pub correct: bool,
}

/// A recommended course with its justification and rank (1 = highest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub course: Course,
    pub reason: String,
    pub priority: u8,
}

/// One submitted attempt. Append-only: never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: ResultId,
    pub student_id: StudentId,
    pub answers: Vec<AssessmentAnswer>,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f32,
    pub measured_level: MeasuredLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_level: Option<DeclaredLevel>,
    pub recommendations: Vec<CourseRecommendation>,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn view(&self) -> AssessmentResultView {
        AssessmentResultView {
            id: self.id,
            student_id: self.student_id,
            score: self.score,
            total_questions: self.total_questions,
            percentage: self.percentage,
            measured_level: self.measured_level,
            declared_level: self.declared_level,
            recommendations: self
                .recommendations
                .iter()
                .map(RecommendationView::from_recommendation)
                .collect(),
            completed_at: self.completed_at,
        }
    }
}

/// API projection of a stored result, without the raw answer list.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResultView {
    pub id: ResultId,
    pub student_id: StudentId,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f32,
    pub measured_level: MeasuredLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_level: Option<DeclaredLevel>,
    pub recommendations: Vec<RecommendationView>,
    pub completed_at: DateTime<Utc>,
}

/// Flattened recommendation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub course_id: String,
    pub title: String,
    pub level: CourseLevel,
    pub duration: String,
    pub reason: String,
    pub priority: u8,
}

impl RecommendationView {
    fn from_recommendation(recommendation: &CourseRecommendation) -> Self {
        Self {
            course_id: recommendation.course.id.clone(),
            title: recommendation.course.title.clone(),
            level: recommendation.course.level,
            duration: recommendation.course.duration.clone(),
            reason: recommendation.reason.clone(),
            priority: recommendation.priority,
        }
    }
}
