use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::lending::domain::{
    ApplicantProfile, ApplicationId, ApplicationStatus, ApplicationSubmission,
};
use crate::lending::evaluation::{EligibilityEvaluator, EligibilityPolicy};
use crate::lending::memory::{InMemoryApplicationRepository, InMemoryUserRepository};
use crate::lending::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};
use crate::lending::{lending_router, LoanApplicationService};

pub(super) type MemoryService =
    LoanApplicationService<InMemoryApplicationRepository, InMemoryUserRepository>;

/// Strong salaried applicant: eligible at the top multiplier tier.
pub(super) fn salaried_profile() -> ApplicantProfile {
    ApplicantProfile {
        name: "Asha Rao".to_string(),
        age: 30,
        annual_income: 600_000.0,
        credit_score: 780,
        monthly_debt_payments: 5_000.0,
        requested_amount: 2_000_000.0,
        loan_tenure_months: 60,
        employment_type: "SALARIED".to_string(),
    }
}

pub(super) fn submission(email: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        profile: salaried_profile(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        loan_purpose: Some("Home renovation".to_string()),
    }
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(EligibilityPolicy::default())
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryApplicationRepository>,
    Arc<InMemoryUserRepository>,
) {
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let service = LoanApplicationService::new(
        applications.clone(),
        users.clone(),
        EligibilityPolicy::default(),
    );
    (service, applications, users)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    lending_router(Arc::new(service))
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("encode body")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Rejects every insert as a duplicate.
pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn by_email(&self, _email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn delete(&self, _id: &ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_email(&self, _email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
