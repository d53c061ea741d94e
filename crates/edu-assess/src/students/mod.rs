//! Student registration, lookup, and lifecycle management.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    DeclaredLevel, EducationLevel, NewStudent, Student, StudentId, StudentUpdate,
    StudentValidationError,
};
pub use repository::StudentRepository;
pub use router::student_router;
pub use service::{StudentPage, StudentProfile, StudentService, StudentServiceError};
