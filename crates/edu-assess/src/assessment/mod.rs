//! The assessment pipeline: scoring, level classification, course
//! recommendation, persistence, and report rendering.
//!
//! Everything in `scoring` and `recommendation` is a pure function over its
//! inputs; the service composes them with the injected repositories and the
//! shared catalog, and the router exposes the result over HTTP.

pub mod domain;
pub mod import;
pub mod recommendation;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

pub use domain::{
    AssessmentAnswer, AssessmentResult, AssessmentResultView, CourseRecommendation, MeasuredLevel,
    RecommendationView, ResultId,
};
pub use import::{AnswerSheetImportError, AnswerSheetImporter};
pub use recommendation::{recommend, MAX_RECOMMENDATIONS};
pub use report::{render_document, render_text_report, ReportData, ReportDocument, ScoreBand};
pub use repository::{NewAssessmentResult, RepositoryError, ResultRepository};
pub use router::assessment_router;
pub use scoring::{score_answers, ScoreSummary, ScoringError};
pub use service::{
    AssessmentService, AssessmentServiceError, AssessmentStats, SubmittedAnswer,
};
