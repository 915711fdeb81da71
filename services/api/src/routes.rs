use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use loan_eligibility::lending::{
    lending_router, ApplicationRepository, LoanApplicationService, UserRepository,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_lending_routes<R, U>(
    service: Arc<LoanApplicationService<R, U>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    lending_router(service)
        .route("/api/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "UP",
        "message": "Loan Eligibility API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().timestamp_millis(),
    }))
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
