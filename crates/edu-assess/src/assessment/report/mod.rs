//! Report rendering for stored assessment results.
//!
//! Both shapes are pure functions over [`ReportData`]: a plain-text block
//! with a fixed section order, and a paginated document of typed blocks for
//! clients that lay the report out visually.

mod document;
mod text;

use serde::Serialize;

use crate::students::domain::Student;

use super::domain::AssessmentResult;

pub use document::{
    render_document, ReportBlock, ReportDocument, ReportPage, ScoreBand,
};
pub use text::render_text_report;

/// Everything a report needs: the student identity plus one stored result.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub student: Student,
    pub result: AssessmentResult,
}

/// Fixed closing checklist shared by both report shapes.
pub(crate) const NEXT_STEPS: [&str; 5] = [
    "Review the course recommendations based on your score",
    "Start with the highest-priority course",
    "Set aside regular study time (recommended: 2-3 hours per day)",
    "Practice with real projects while you study",
    "Reach out to our instructors whenever you need help",
];

pub(crate) const PLATFORM_NAME: &str = "EduTech Academy";
