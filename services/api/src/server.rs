use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryResultRepository, InMemoryStudentRepository};
use crate::routes::platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use edu_assess::assessment::recommendation;
use edu_assess::assessment::service::{AssessmentService, AssessmentServiceError};
use edu_assess::catalog::Catalog;
use edu_assess::config::AppConfig;
use edu_assess::error::AppError;
use edu_assess::students::service::StudentService;
use edu_assess::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(Catalog::standard());
    // A catalog that cannot satisfy the recommendation tables is a deploy
    // error, so fail before binding the listener.
    recommendation::verify_tables(&catalog).map_err(AssessmentServiceError::from)?;

    let students = Arc::new(InMemoryStudentRepository::default());
    let results = Arc::new(InMemoryResultRepository::default());
    let student_service = Arc::new(StudentService::new(students.clone(), results.clone()));
    let assessment_service = Arc::new(AssessmentService::new(students, results, catalog));

    let app = platform_routes(student_service, assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skills assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
