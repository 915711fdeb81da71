use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    ApplicantProfile, ApplicationId, ApplicationStatus, ApplicationSubmission, UserId, UserRecord,
};
use super::evaluation::{EligibilityEvaluator, EligibilityPolicy, EligibilityVerdict};
use super::repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStats, RepositoryError, UserRepository,
};
use super::validation::{RequestValidator, ValidationError};

/// Service composing validation, evaluation, and the two repositories.
pub struct LoanApplicationService<R, U> {
    validator: RequestValidator,
    evaluator: Arc<EligibilityEvaluator>,
    applications: Arc<R>,
    users: Arc<U>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:06}"))
}

impl<R, U> LoanApplicationService<R, U>
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(applications: Arc<R>, users: Arc<U>, policy: EligibilityPolicy) -> Self {
        Self {
            validator: RequestValidator,
            evaluator: Arc::new(EligibilityEvaluator::new(policy)),
            applications,
            users,
        }
    }

    /// Validate and evaluate without persisting anything.
    pub fn check_eligibility(
        &self,
        profile: Option<&ApplicantProfile>,
    ) -> Result<EligibilityVerdict, ApplicationServiceError> {
        if let Some(profile) = profile {
            self.validator.check_profile(profile)?;
        }
        let verdict = self.evaluator.assess(profile);
        debug!(eligible = verdict.eligible, reason = %verdict.reason, "eligibility evaluated");
        Ok(verdict)
    }

    /// Persist a submission alongside a verdict computed elsewhere.
    pub fn save_application(
        &self,
        submission: ApplicationSubmission,
        verdict: EligibilityVerdict,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.validator.check_submission(&submission)?;
        self.persist(submission, verdict)
    }

    /// Evaluate a submission and persist it with the fresh verdict.
    pub fn check_and_save(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.validator.check_submission(&submission)?;
        let verdict = self.evaluator.evaluate(&submission.profile);
        self.persist(submission, verdict)
    }

    pub fn applications_for_email(
        &self,
        email: &str,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.applications.by_email(email.trim())?)
    }

    pub fn applications_with_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.applications.by_status(status)?)
    }

    pub fn all_applications(&self) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.applications.all()?)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut record = self.get(id)?;
        let previous = record.status;
        record.status = status;
        record.updated_at = Utc::now();
        let record = self.applications.update(record)?;
        info!(application_id = %id, from = %previous, to = %status, "application status changed");
        Ok(record)
    }

    pub fn delete(&self, id: &ApplicationId) -> Result<(), ApplicationServiceError> {
        self.applications.delete(id)?;
        info!(application_id = %id, "application deleted");
        Ok(())
    }

    pub fn user_by_email(&self, email: &str) -> Result<UserRecord, ApplicationServiceError> {
        let user = self
            .users
            .find_by_email(email.trim())?
            .ok_or(RepositoryError::NotFound)?;
        Ok(user)
    }

    pub fn stats(&self) -> Result<ApplicationStats, ApplicationServiceError> {
        let records = self.applications.all()?;
        Ok(ApplicationStats::from_records(&records))
    }

    fn persist(
        &self,
        mut submission: ApplicationSubmission,
        verdict: EligibilityVerdict,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        submission.email = submission.email.trim().to_string();
        let user = self.find_or_create_user(&submission)?;
        let now = Utc::now();
        let record = ApplicationRecord {
            id: next_application_id(),
            user_id: user.id,
            submission,
            verdict,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let stored = self.applications.insert(record)?;
        info!(
            application_id = %stored.id,
            eligible = stored.verdict.eligible,
            approved_amount = stored.verdict.approved_amount,
            "loan application saved"
        );
        Ok(stored)
    }

    fn find_or_create_user(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<UserRecord, ApplicationServiceError> {
        let now = Utc::now();
        let email = submission.email.trim();
        let user = match self.users.find_by_email(email)? {
            Some(mut existing) => {
                existing.name = submission.profile.name.clone();
                existing.phone = submission.phone.clone();
                existing.updated_at = now;
                existing
            }
            None => {
                let user = UserRecord {
                    id: next_user_id(),
                    name: submission.profile.name.clone(),
                    email: email.to_string(),
                    phone: submission.phone.clone(),
                    created_at: now,
                    updated_at: now,
                };
                debug!(user_id = %user.id.0, "registering new applicant");
                user
            }
        };
        Ok(self.users.upsert(user)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
