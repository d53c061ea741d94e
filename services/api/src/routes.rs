use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use edu_assess::assessment::repository::ResultRepository;
use edu_assess::assessment::router::assessment_router;
use edu_assess::assessment::service::AssessmentService;
use edu_assess::students::repository::StudentRepository;
use edu_assess::students::router::student_router;
use edu_assess::students::service::StudentService;
use serde_json::json;

use crate::infra::AppState;

/// Merge the per-domain routers and attach the operational endpoints.
pub(crate) fn platform_routes<S, R>(
    students: Arc<StudentService<S, R>>,
    assessments: Arc<AssessmentService<S, R>>,
) -> Router
where
    S: StudentRepository + 'static,
    R: ResultRepository + 'static,
{
    student_router(students)
        .merge(assessment_router(assessments))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryResultRepository, InMemoryStudentRepository};
    use axum::body::Body;
    use axum::http::Request;
    use edu_assess::catalog::Catalog;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let students = Arc::new(InMemoryStudentRepository::default());
        let results = Arc::new(InMemoryResultRepository::default());
        let catalog = Arc::new(Catalog::standard());
        let student_service = Arc::new(StudentService::new(students.clone(), results.clone()));
        let assessment_service = Arc::new(AssessmentService::new(students, results, catalog));
        platform_routes(student_service, assessment_service)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn register_then_submit_then_fetch_report() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/students",
                json!({
                    "name": "Ana Torres",
                    "email": "ana@example.com",
                    "declared_level": "basic"
                }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);
        let student = body_json(response).await;
        let student_id = student["id"].as_i64().expect("id assigned");

        // Eight correct answers out of ten lands in the advanced bracket.
        let catalog = Catalog::standard();
        let answers: Vec<serde_json::Value> = catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = if index < 8 {
                    question.correct_option
                } else {
                    (question.correct_option + 1) % question.options.len()
                };
                json!({ "question_id": question.id, "selected_option": selected })
            })
            .collect();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/assessment/submit",
                json!({ "student_id": student_id, "answers": answers }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);
        let result = body_json(response).await;
        assert_eq!(result["percentage"], 80.0);
        assert_eq!(result["measured_level"], "advanced");
        let result_id = result["id"].as_i64().expect("result id assigned");

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/assessment/result/{result_id}/report"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let report = String::from_utf8(bytes.to_vec()).expect("report is utf-8");
        assert!(report.contains("Score: 80%"));
        assert!(report.contains("Measured Level: ADVANCED"));
    }

    #[tokio::test]
    async fn empty_submission_is_rejected_and_nothing_is_stored() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/students",
                json!({ "name": "Luis Romero", "email": "luis@example.com" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/assessment/submit",
                json!({ "student_id": 1, "answers": [] }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/assessment/stats")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let stats = body_json(response).await;
        assert_eq!(stats["total_results"], 0);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let app = app();
        let payload = json!({ "name": "Ana Torres", "email": "ana@example.com" });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/students", payload.clone()))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("POST", "/api/v1/students", payload))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
