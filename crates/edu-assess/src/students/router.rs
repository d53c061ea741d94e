use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::assessment::repository::ResultRepository;

use super::domain::{NewStudent, StudentId, StudentUpdate};
use super::repository::StudentRepository;
use super::service::{StudentService, StudentServiceError};

/// Router builder exposing student CRUD endpoints.
pub fn student_router<S, R>(service: Arc<StudentService<S, R>>) -> Router
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/students", post(register_handler::<S, R>))
        .route("/api/v1/students", get(list_handler::<S, R>))
        .route("/api/v1/students/:id", get(get_handler::<S, R>))
        .route("/api/v1/students/:id", put(update_handler::<S, R>))
        .route("/api/v1/students/:id", delete(delete_handler::<S, R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
}

fn error_response(error: StudentServiceError) -> Response {
    let status = match &error {
        StudentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StudentServiceError::EmailTaken(_) => StatusCode::CONFLICT,
        StudentServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        StudentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<S, R>(
    State(service): State<Arc<StudentService<S, R>>>,
    axum::Json(new): axum::Json<NewStudent>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.register(new) {
        Ok(student) => (StatusCode::CREATED, axum::Json(student)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<S, R>(
    State(service): State<Arc<StudentService<S, R>>>,
    Query(query): Query<PageQuery>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    match service.page(page, limit) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<S, R>(
    State(service): State<Arc<StudentService<S, R>>>,
    Path(id): Path<i64>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.get(StudentId(id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<S, R>(
    State(service): State<Arc<StudentService<S, R>>>,
    Path(id): Path<i64>,
    axum::Json(update): axum::Json<StudentUpdate>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.update(StudentId(id), update) {
        Ok(student) => (StatusCode::OK, axum::Json(student)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<S, R>(
    State(service): State<Arc<StudentService<S, R>>>,
    Path(id): Path<i64>,
) -> Response
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.delete(StudentId(id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "student deleted" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
