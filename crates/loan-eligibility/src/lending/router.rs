use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::domain::{ApplicantProfile, ApplicationId, ApplicationStatus, ApplicationSubmission};
use super::evaluation::EligibilityVerdict;
use super::repository::{ApplicationRepository, RepositoryError, UserRepository};
use super::service::{ApplicationServiceError, LoanApplicationService};
use super::validation::ValidationError;

type SharedService<R, U> = State<Arc<LoanApplicationService<R, U>>>;

/// Router exposing eligibility checks and application management.
pub fn lending_router<R, U>(service: Arc<LoanApplicationService<R, U>>) -> Router
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/api/check-eligibility", post(check_eligibility_handler::<R, U>))
        .route("/api/save-application", post(save_application_handler::<R, U>))
        .route(
            "/api/check-eligibility-and-save",
            post(check_and_save_handler::<R, U>),
        )
        .route("/api/get-applications", get(applications_by_email_handler::<R, U>))
        .route("/api/application/:id", get(application_handler::<R, U>))
        .route("/api/admin/applications", get(all_applications_handler::<R, U>))
        .route(
            "/api/admin/application/:id/status",
            put(update_status_handler::<R, U>),
        )
        .route(
            "/api/admin/application/:id",
            delete(delete_application_handler::<R, U>),
        )
        .route("/api/admin/stats", get(stats_handler::<R, U>))
        .route("/api/user", get(user_handler::<R, U>))
        .with_state(service)
}

/// Submission carrying a verdict the client obtained from an earlier check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveApplicationRequest {
    #[serde(flatten)]
    pub submission: ApplicationSubmission,
    #[serde(default)]
    pub eligible: bool,
    #[serde(default)]
    pub eligibility_reason: String,
    #[serde(default)]
    pub max_loan_amount: Option<f64>,
    #[serde(default)]
    pub approved_amount: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub monthly_emi: f64,
}

impl SaveApplicationRequest {
    fn into_parts(self) -> (ApplicationSubmission, EligibilityVerdict) {
        let approved_amount = self.approved_amount.max(0.0);
        let verdict = EligibilityVerdict {
            eligible: self.eligible,
            reason: self.eligibility_reason,
            max_loan_amount: self
                .max_loan_amount
                .unwrap_or(approved_amount)
                .max(approved_amount),
            approved_amount,
            interest_rate: self.interest_rate,
            monthly_emi: self.monthly_emi,
        };
        (self.submission, verdict)
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

fn timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

fn verdict_payload(verdict: &EligibilityVerdict) -> serde_json::Map<String, Value> {
    match serde_json::to_value(verdict) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

fn failure_response(error: ApplicationServiceError, failed: &str, missing: &str) -> Response {
    match error {
        ApplicationServiceError::Validation(validation) => {
            let payload = json!({
                "success": false,
                "message": "Validation failed",
                "errors": validation.errors,
                "timestamp": timestamp(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        ApplicationServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "success": false,
                "error": missing,
                "message": missing,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ApplicationServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "success": false,
                "error": "Duplicate entry detected",
                "message": failed,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            warn!(error = %other, "{failed}");
            let payload = json!({
                "success": false,
                "error": failed,
                "message": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Bodies serde could not decode get the same 400 shape as field validation.
fn rejection_response(rejection: JsonRejection) -> Response {
    let detail = rejection.body_text();
    debug!(%detail, "request body rejected");
    let (field, message) = rejected_field(&detail);
    let errors = BTreeMap::from([(field, message)]);
    failure_response(
        ApplicationServiceError::Validation(ValidationError { errors }),
        "Invalid request body",
        "Not found",
    )
}

fn rejected_field(detail: &str) -> (String, String) {
    let reason = detail
        .rsplit_once("target type: ")
        .map_or(detail, |(_, reason)| reason);

    if let Some((_, rest)) = reason.split_once("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return (field.to_string(), format!("{field} is required"));
        }
    }

    if let Some((path, problem)) = reason.split_once(": ") {
        let is_path = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '[' | ']'));
        if is_path {
            return (path.to_string(), problem.to_string());
        }
    }

    ("body".to_string(), reason.to_string())
}

fn bad_request(message: String) -> Response {
    let payload = json!({
        "success": false,
        "error": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn check_eligibility_handler<R, U>(
    State(service): SharedService<R, U>,
    payload: Result<Json<Option<ApplicantProfile>>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let Json(profile) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.check_eligibility(profile.as_ref()) {
        Ok(verdict) => {
            let mut payload = verdict_payload(&verdict);
            payload.insert("timestamp".to_string(), json!(timestamp()));
            (StatusCode::OK, Json(Value::Object(payload))).into_response()
        }
        Err(error) => failure_response(error, "Failed to check eligibility", "Not found"),
    }
}

pub(crate) async fn save_application_handler<R, U>(
    State(service): SharedService<R, U>,
    payload: Result<Json<SaveApplicationRequest>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let (submission, verdict) = request.into_parts();
    match service.save_application(submission, verdict) {
        Ok(record) => {
            let payload = json!({
                "success": true,
                "message": "Application saved successfully",
                "applicationId": record.id,
                "status": record.status,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(error, "Failed to save application", "Not found"),
    }
}

pub(crate) async fn check_and_save_handler<R, U>(
    State(service): SharedService<R, U>,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.check_and_save(submission) {
        Ok(record) => {
            let mut payload = verdict_payload(&record.verdict);
            payload.insert("success".to_string(), json!(true));
            payload.insert("applicationId".to_string(), json!(record.id));
            payload.insert("applicationStatus".to_string(), json!(record.status));
            payload.insert("timestamp".to_string(), json!(timestamp()));
            (StatusCode::OK, Json(Value::Object(payload))).into_response()
        }
        Err(error) => failure_response(error, "Failed to process application", "Not found"),
    }
}

pub(crate) async fn applications_by_email_handler<R, U>(
    State(service): SharedService<R, U>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match service.applications_for_email(&query.email) {
        Ok(applications) => {
            let payload = json!({
                "success": true,
                "count": applications.len(),
                "applications": applications,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(error, "Failed to retrieve applications", "Not found"),
    }
}

pub(crate) async fn all_applications_handler<R, U>(
    State(service): SharedService<R, U>,
    Query(filter): Query<StatusFilter>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let result = match filter.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match raw.parse::<ApplicationStatus>() {
            Ok(status) => service.applications_with_status(status),
            Err(error) => return bad_request(error.to_string()),
        },
        _ => service.all_applications(),
    };

    match result {
        Ok(applications) => {
            let payload = json!({
                "success": true,
                "count": applications.len(),
                "applications": applications,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(error, "Failed to retrieve applications", "Not found"),
    }
}

pub(crate) async fn application_handler<R, U>(
    State(service): SharedService<R, U>,
    Path(id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let id = ApplicationId(id);
    match service.get(&id) {
        Ok(application) => {
            let payload = json!({
                "success": true,
                "application": application,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(
            error,
            "Failed to retrieve application",
            &format!("No application found with ID: {id}"),
        ),
    }
}

pub(crate) async fn update_status_handler<R, U>(
    State(service): SharedService<R, U>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let raw = update.status.unwrap_or_default();
    if raw.trim().is_empty() {
        return bad_request("Status is required".to_string());
    }
    let status = match raw.parse::<ApplicationStatus>() {
        Ok(status) => status,
        Err(error) => return bad_request(error.to_string()),
    };

    let id = ApplicationId(id);
    match service.update_status(&id, status) {
        Ok(application) => {
            let payload = json!({
                "success": true,
                "message": "Application status updated successfully",
                "application": application,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(
            error,
            "Failed to update application status",
            &format!("Application not found with ID: {id}"),
        ),
    }
}

pub(crate) async fn delete_application_handler<R, U>(
    State(service): SharedService<R, U>,
    Path(id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let id = ApplicationId(id);
    match service.delete(&id) {
        Ok(()) => {
            let payload = json!({
                "success": true,
                "message": "Application deleted successfully",
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(
            error,
            "Failed to delete application",
            &format!("Application not found with ID: {id}"),
        ),
    }
}

pub(crate) async fn stats_handler<R, U>(State(service): SharedService<R, U>) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match service.stats() {
        Ok(stats) => {
            let payload = json!({
                "success": true,
                "stats": stats,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(error, "Failed to retrieve statistics", "Not found"),
    }
}

pub(crate) async fn user_handler<R, U>(
    State(service): SharedService<R, U>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match service.user_by_email(&query.email) {
        Ok(user) => {
            let payload = json!({
                "success": true,
                "user": user,
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => failure_response(
            error,
            "Failed to retrieve user",
            &format!("No user found with email: {}", query.email),
        ),
    }
}
