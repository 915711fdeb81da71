use super::super::domain::ApplicantProfile;
use super::config::EligibilityPolicy;
use super::terms::format_rupees;
use serde::{Deserialize, Serialize};

/// First policy gate an applicant failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    MissingProfile,
    AgeOutOfRange { min: u32, max: u32, actual: u32 },
    InsufficientIncome { minimum: f64, actual: f64 },
    LowCreditScore { minimum: u16, actual: u16 },
    ExcessiveDebtToIncome { maximum: f64, actual: f64 },
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::MissingProfile => "Invalid request data".to_string(),
            IneligibilityReason::AgeOutOfRange { min, max, .. } => {
                format!("Age must be between {min} and {max} years")
            }
            IneligibilityReason::InsufficientIncome { minimum, .. } => format!(
                "Annual income must be at least {}",
                format_rupees(*minimum, 0)
            ),
            IneligibilityReason::LowCreditScore { minimum, .. } => {
                format!("Credit score must be at least {minimum}")
            }
            IneligibilityReason::ExcessiveDebtToIncome { maximum, .. } => format!(
                "Debt-to-income ratio too high. Maximum allowed: {:.0}%",
                maximum * 100.0
            ),
        }
    }
}

/// Run the gates in order and stop at the first failure.
pub(crate) fn first_failed_gate(
    profile: &ApplicantProfile,
    policy: &EligibilityPolicy,
) -> Option<IneligibilityReason> {
    if profile.age < policy.min_age || profile.age > policy.max_age {
        return Some(IneligibilityReason::AgeOutOfRange {
            min: policy.min_age,
            max: policy.max_age,
            actual: profile.age,
        });
    }

    if profile.annual_income < policy.min_annual_income {
        return Some(IneligibilityReason::InsufficientIncome {
            minimum: policy.min_annual_income,
            actual: profile.annual_income,
        });
    }

    if profile.credit_score < policy.min_credit_score {
        return Some(IneligibilityReason::LowCreditScore {
            minimum: policy.min_credit_score,
            actual: profile.credit_score,
        });
    }

    let ratio = profile.debt_to_income_ratio();
    if ratio.is_nan() || ratio > policy.max_debt_to_income_ratio {
        return Some(IneligibilityReason::ExcessiveDebtToIncome {
            maximum: policy.max_debt_to_income_ratio,
            actual: ratio,
        });
    }

    None
}
