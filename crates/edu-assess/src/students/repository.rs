use super::domain::{NewStudent, Student, StudentId, StudentUpdate};

pub use crate::assessment::repository::RepositoryError;

/// Storage abstraction for student records. Implementations enforce the
/// unique-email constraint and assign auto-incrementing identifiers.
pub trait StudentRepository: Send + Sync {
    fn insert(&self, new: NewStudent) -> Result<Student, RepositoryError>;
    fn fetch(&self, id: StudentId) -> Result<Option<Student>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Student>, RepositoryError>;
    /// Newest registrations first; returns the page plus the total count.
    fn page(&self, offset: usize, limit: usize) -> Result<(Vec<Student>, usize), RepositoryError>;
    fn update(&self, id: StudentId, update: StudentUpdate) -> Result<Student, RepositoryError>;
    fn delete(&self, id: StudentId) -> Result<(), RepositoryError>;
}
