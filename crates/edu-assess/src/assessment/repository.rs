use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::students::domain::{DeclaredLevel, StudentId};

use super::domain::{
    AssessmentAnswer, AssessmentResult, CourseRecommendation, MeasuredLevel, ResultId,
};

/// A scored attempt before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessmentResult {
    pub student_id: StudentId,
    pub answers: Vec<AssessmentAnswer>,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f32,
    pub measured_level: MeasuredLevel,
    pub declared_level: Option<DeclaredLevel>,
    pub recommendations: Vec<CourseRecommendation>,
    pub completed_at: DateTime<Utc>,
}

/// Storage abstraction for assessment results. Records are append-only;
/// the only mutation is the cascade delete when a student is removed.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, new: NewAssessmentResult) -> Result<AssessmentResult, RepositoryError>;
    fn fetch(&self, id: ResultId) -> Result<Option<AssessmentResult>, RepositoryError>;
    /// Newest attempts first.
    fn for_student(&self, student_id: StudentId)
        -> Result<Vec<AssessmentResult>, RepositoryError>;
    /// Returns the number of removed records.
    fn delete_for_student(&self, student_id: StudentId) -> Result<usize, RepositoryError>;
    fn all(&self) -> Result<Vec<AssessmentResult>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
