use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::assessment::domain::{AssessmentResult, AssessmentResultView};
use crate::assessment::repository::{RepositoryError, ResultRepository};

use super::domain::{NewStudent, Student, StudentId, StudentUpdate, StudentValidationError};
use super::repository::StudentRepository;

/// How many recent attempts ride along with a single-student lookup.
const RECENT_RESULTS: usize = 5;

/// A student plus their most recent assessment attempts.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub recent_results: Vec<AssessmentResultView>,
}

/// List entry: the student record with an attempt count.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    #[serde(flatten)]
    pub student: Student,
    pub result_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentPage {
    pub students: Vec<StudentSummary>,
    pub pagination: Pagination,
}

/// Registration, lookup, and lifecycle over the injected repositories.
/// Deleting a student cascades to their stored results.
pub struct StudentService<S, R> {
    students: Arc<S>,
    results: Arc<R>,
}

impl<S, R> StudentService<S, R>
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    pub fn new(students: Arc<S>, results: Arc<R>) -> Self {
        Self { students, results }
    }

    pub fn register(&self, new: NewStudent) -> Result<Student, StudentServiceError> {
        new.validate()?;

        if self.students.find_by_email(&new.email)?.is_some() {
            return Err(StudentServiceError::EmailTaken(new.email));
        }

        let email = new.email.clone();
        let student = match self.students.insert(new) {
            Ok(student) => student,
            // Lost the race against a concurrent registration for the same address.
            Err(RepositoryError::Conflict) => {
                return Err(StudentServiceError::EmailTaken(email))
            }
            Err(other) => return Err(other.into()),
        };

        info!(student = %student.id, "student registered");
        Ok(student)
    }

    pub fn get(&self, id: StudentId) -> Result<StudentProfile, StudentServiceError> {
        let student = self
            .students
            .fetch(id)?
            .ok_or(StudentServiceError::NotFound(id))?;
        let recent_results = self
            .results
            .for_student(id)?
            .iter()
            .take(RECENT_RESULTS)
            .map(AssessmentResult::view)
            .collect();

        Ok(StudentProfile {
            student,
            recent_results,
        })
    }

    pub fn page(&self, page: usize, limit: usize) -> Result<StudentPage, StudentServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let (students, total) = self.students.page(offset, limit)?;
        let mut summaries = Vec::with_capacity(students.len());
        for student in students {
            let result_count = self.results.for_student(student.id)?.len();
            summaries.push(StudentSummary {
                student,
                result_count,
            });
        }

        Ok(StudentPage {
            students: summaries,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        })
    }

    pub fn update(
        &self,
        id: StudentId,
        update: StudentUpdate,
    ) -> Result<Student, StudentServiceError> {
        update.validate()?;

        let existing = self
            .students
            .fetch(id)?
            .ok_or(StudentServiceError::NotFound(id))?;

        // Uniqueness is case-insensitive, so the self-exclusion must be too:
        // re-casing your own address is not a conflict.
        if let Some(email) = &update.email {
            if !email.eq_ignore_ascii_case(&existing.email)
                && self.students.find_by_email(email)?.is_some()
            {
                return Err(StudentServiceError::EmailTaken(email.clone()));
            }
        }

        let requested_email = update.email.clone();
        match self.students.update(id, update) {
            Ok(student) => Ok(student),
            Err(RepositoryError::NotFound) => Err(StudentServiceError::NotFound(id)),
            // Lost the race against a concurrent registration or update.
            Err(RepositoryError::Conflict) => Err(StudentServiceError::EmailTaken(
                requested_email.unwrap_or(existing.email),
            )),
            Err(other) => Err(other.into()),
        }
    }

    /// Remove the student and, by cascade, every result they own.
    pub fn delete(&self, id: StudentId) -> Result<(), StudentServiceError> {
        if self.students.fetch(id)?.is_none() {
            return Err(StudentServiceError::NotFound(id));
        }

        let removed = self.results.delete_for_student(id)?;
        self.students.delete(id)?;
        info!(student = %id, removed_results = removed, "student deleted");
        Ok(())
    }
}

/// Error raised by the student service.
#[derive(Debug, thiserror::Error)]
pub enum StudentServiceError {
    #[error(transparent)]
    Validation(#[from] StudentValidationError),
    #[error("a student with email '{0}' is already registered")]
    EmailTaken(String),
    #[error("student {0} not found")]
    NotFound(StudentId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
