use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, UserId, UserRecord};
use super::evaluation::EligibilityVerdict;

/// Stored application: what was submitted, what was decided, and where it stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub submission: ApplicationSubmission,
    pub verdict: EligibilityVerdict,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn email(&self) -> &str {
        &self.submission.email
    }
}

/// Storage abstraction for loan applications.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Newest first.
    fn by_email(&self, email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    /// Newest first.
    fn by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for applicant accounts, keyed by e-mail.
pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
    fn upsert(&self, user: UserRecord) -> Result<UserRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Portfolio totals reported to administrators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total_applications: u64,
    pub approved_applications: u64,
    pub pending_applications: u64,
    pub rejected_applications: u64,
    pub under_review_applications: u64,
    pub total_requested_amount: f64,
    pub total_approved_amount: f64,
}

impl ApplicationStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ApplicationRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.total_applications += 1;
            match record.status {
                ApplicationStatus::Approved => stats.approved_applications += 1,
                ApplicationStatus::Pending => stats.pending_applications += 1,
                ApplicationStatus::Rejected => stats.rejected_applications += 1,
                ApplicationStatus::UnderReview => stats.under_review_applications += 1,
            }
            stats.total_requested_amount += record.submission.profile.requested_amount;
            if record.verdict.approved_amount > 0.0 {
                stats.total_approved_amount += record.verdict.approved_amount;
            }
        }
        stats
    }
}
