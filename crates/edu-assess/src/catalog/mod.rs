//! Static question and course reference data.
//!
//! The catalog is immutable after construction: the service builds it once at
//! startup and shares it behind an `Arc`. Lookup failures for identifiers the
//! recommendation tables reference are static-data defects, not runtime
//! conditions, and are surfaced as [`CatalogError`] immediately.

mod courses;
mod questions;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Difficulty band attached to each catalog question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Topic area a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Html,
    Css,
    Javascript,
}

/// Target audience of a catalog course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const fn label(self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

/// Track a course belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    Frontend,
    Backend,
    Fullstack,
}

/// A fixed-choice assessment question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
}

/// A course the recommendation engine can point students at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub category: CourseCategory,
    pub duration: String,
    pub topics: Vec<String>,
    pub prerequisites: Vec<String>,
}

/// Lookup failure against the static catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown course id '{0}'")]
    UnknownCourse(String),
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),
}

/// Immutable question/course catalog with indexed lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    courses: Vec<Course>,
    question_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>, courses: Vec<Course>) -> Self {
        let question_index = questions
            .iter()
            .enumerate()
            .map(|(idx, question)| (question.id.clone(), idx))
            .collect();
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(idx, course)| (course.id.clone(), idx))
            .collect();

        Self {
            questions,
            courses,
            question_index,
            course_index,
        }
    }

    /// The catalog the application ships with: ten questions, ten courses.
    pub fn standard() -> Self {
        Self::new(questions::standard_questions(), courses::standard_courses())
    }

    pub fn question(&self, id: &str) -> Result<&Question, CatalogError> {
        self.question_index
            .get(id)
            .map(|idx| &self.questions[*idx])
            .ok_or_else(|| CatalogError::UnknownQuestion(id.to_string()))
    }

    pub fn course(&self, id: &str) -> Result<&Course, CatalogError> {
        self.course_index
            .get(id)
            .map(|idx| &self.courses[*idx])
            .ok_or_else(|| CatalogError::UnknownCourse(id.to_string()))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_ten_questions_and_courses() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.questions().len(), 10);
        assert_eq!(catalog.courses().len(), 10);
    }

    #[test]
    fn every_question_has_a_valid_correct_option() {
        let catalog = Catalog::standard();
        for question in catalog.questions() {
            assert!(
                question.correct_option < question.options.len(),
                "question {} points outside its options",
                question.id
            );
        }
    }

    #[test]
    fn course_lookup_by_id_round_trips() {
        let catalog = Catalog::standard();
        let course = catalog.course("6").expect("course 6 exists");
        assert_eq!(course.level, CourseLevel::Advanced);
        assert!(matches!(
            catalog.course("99"),
            Err(CatalogError::UnknownCourse(_))
        ));
    }

    #[test]
    fn question_lookup_rejects_unknown_ids() {
        let catalog = Catalog::standard();
        assert!(catalog.question("1").is_ok());
        assert!(matches!(
            catalog.question("42"),
            Err(CatalogError::UnknownQuestion(_))
        ));
    }
}
