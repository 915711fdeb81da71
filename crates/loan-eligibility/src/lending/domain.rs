use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Financial snapshot an applicant submits for an eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub annual_income: f64,
    pub credit_score: u16,
    #[serde(default)]
    pub monthly_debt_payments: f64,
    pub requested_amount: f64,
    #[serde(rename = "loanTenure")]
    pub loan_tenure_months: u32,
    #[serde(default)]
    pub employment_type: String,
}

impl ApplicantProfile {
    /// Monthly debt obligations divided by monthly income.
    pub fn debt_to_income_ratio(&self) -> f64 {
        self.monthly_debt_payments / (self.annual_income / 12.0)
    }
}

/// Profile plus the contact details required to file an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(flatten)]
    pub profile: ApplicantProfile,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<String>,
}

/// Review state of a filed application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    UnderReview,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::UnderReview => "UNDER_REVIEW",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "APPROVED" => Ok(ApplicationStatus::Approved),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "UNDER_REVIEW" => Ok(ApplicationStatus::UnderReview),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// Applicant account keyed by e-mail address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_ignores_case_and_separators() {
        assert_eq!(
            "approved".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Approved)
        );
        assert_eq!(
            " Under-Review ".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::UnderReview)
        );
        assert_eq!(
            "archived".parse::<ApplicationStatus>(),
            Err(UnknownStatus("archived".to_string()))
        );
    }

    #[test]
    fn status_serializes_in_screaming_case() {
        let encoded = serde_json::to_string(&ApplicationStatus::UnderReview).expect("encodes");
        assert_eq!(encoded, "\"UNDER_REVIEW\"");
    }

    #[test]
    fn submission_reads_flat_camel_case_payload() {
        let submission: ApplicationSubmission = serde_json::from_value(serde_json::json!({
            "name": "Asha Rao",
            "age": 30,
            "annualIncome": 600000.0,
            "creditScore": 780,
            "monthlyDebtPayments": 5000.0,
            "requestedAmount": 2000000.0,
            "loanTenure": 60,
            "employmentType": "SALARIED",
            "email": "asha@example.com",
            "phone": "9876543210"
        }))
        .expect("submission decodes");

        assert_eq!(submission.profile.loan_tenure_months, 60);
        assert_eq!(submission.email, "asha@example.com");
        assert!(submission.loan_purpose.is_none());
    }
}
