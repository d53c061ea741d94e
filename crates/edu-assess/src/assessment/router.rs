use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::students::domain::StudentId;
use crate::students::repository::StudentRepository;

use super::domain::{AssessmentResult, ResultId};
use super::report::{render_document, render_text_report};
use super::repository::ResultRepository;
use super::service::{AssessmentService, AssessmentServiceError, SubmittedAnswer};

/// Router builder exposing the assessment submission and result endpoints.
pub fn assessment_router<S, R>(service: Arc<AssessmentService<S, R>>) -> Router
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessment/submit", post(submit_handler::<S, R>))
        .route(
            "/api/v1/assessment/results/:student_id",
            get(results_handler::<S, R>),
        )
        .route("/api/v1/assessment/result/:id", get(result_handler::<S, R>))
        .route(
            "/api/v1/assessment/result/:id/report",
            get(report_handler::<S, R>),
        )
        .route("/api/v1/assessment/stats", get(stats_handler::<S, R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) student_id: i64,
    pub(crate) answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    format: Option<String>,
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::StudentNotFound(_)
        | AssessmentServiceError::ResultNotFound(_) => StatusCode::NOT_FOUND,
        err if err.is_invalid_submission() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, R>(
    State(service): State<Arc<AssessmentService<S, R>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.submit(StudentId(request.student_id), request.answers) {
        Ok(result) => (StatusCode::CREATED, axum::Json(result.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_handler<S, R>(
    State(service): State<Arc<AssessmentService<S, R>>>,
    Path(student_id): Path<i64>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.results_for_student(StudentId(student_id)) {
        Ok(results) => {
            let views: Vec<_> = results.iter().map(AssessmentResult::view).collect();
            (StatusCode::OK, axum::Json(json!({ "results": views }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<S, R>(
    State(service): State<Arc<AssessmentService<S, R>>>,
    Path(id): Path<i64>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.result(ResultId(id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<S, R>(
    State(service): State<Arc<AssessmentService<S, R>>>,
    Path(id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    let data = match service.report_data(ResultId(id)) {
        Ok(data) => data,
        Err(error) => return error_response(error),
    };

    if query.format.as_deref() == Some("document") {
        let document = render_document(&data);
        return (StatusCode::OK, axum::Json(document)).into_response();
    }

    let text = render_text_report(&data);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response()
}

pub(crate) async fn stats_handler<S, R>(
    State(service): State<Arc<AssessmentService<S, R>>>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}
