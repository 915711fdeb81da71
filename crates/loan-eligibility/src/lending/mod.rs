//! Loan eligibility evaluation and application intake.
//!
//! The evaluator in [`evaluation`] is a pure function of the applicant profile and the
//! lending policy. Everything else here (validation, repositories, the service facade, and
//! the HTTP router) moves data in and out of it.

pub mod domain;
pub mod evaluation;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, ApplicationId, ApplicationStatus, ApplicationSubmission, UnknownStatus,
    UserId, UserRecord,
};
pub use evaluation::{
    EligibilityEvaluator, EligibilityPolicy, EligibilityVerdict, IneligibilityReason,
};
pub use memory::{InMemoryApplicationRepository, InMemoryUserRepository};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStats, RepositoryError, UserRepository,
};
pub use router::{lending_router, SaveApplicationRequest};
pub use service::{ApplicationServiceError, LoanApplicationService};
pub use validation::{RequestValidator, ValidationError};
