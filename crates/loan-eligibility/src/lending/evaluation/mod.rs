mod config;
mod policy;
mod terms;

pub use config::EligibilityPolicy;
pub use policy::IneligibilityReason;
pub use terms::{format_rupees, monthly_emi, round_half_up};

use super::domain::ApplicantProfile;
use policy::first_failed_gate;
use serde::{Deserialize, Serialize};

const ELIGIBLE_REASON: &str = "Congratulations! You are eligible for a loan";

/// Stateless evaluator applying an [`EligibilityPolicy`] to applicant profiles.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    policy: EligibilityPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    /// Evaluate a profile that may be absent from the request.
    pub fn assess(&self, profile: Option<&ApplicantProfile>) -> EligibilityVerdict {
        match profile {
            Some(profile) => self.evaluate(profile),
            None => EligibilityVerdict::ineligible(IneligibilityReason::MissingProfile),
        }
    }

    pub fn evaluate(&self, profile: &ApplicantProfile) -> EligibilityVerdict {
        if let Some(reason) = first_failed_gate(profile, &self.policy) {
            return EligibilityVerdict::ineligible(reason);
        }

        let max_loan_amount = terms::max_loan_amount(profile);
        let interest_rate = terms::interest_rate(profile.credit_score, &self.policy);

        let mut verdict = EligibilityVerdict {
            eligible: true,
            reason: ELIGIBLE_REASON.to_string(),
            max_loan_amount,
            approved_amount: 0.0,
            interest_rate,
            monthly_emi: 0.0,
        };

        if profile.requested_amount > 0.0 && profile.loan_tenure_months > 0 {
            let approved = if profile.requested_amount <= max_loan_amount {
                profile.requested_amount
            } else {
                verdict.reason = format!(
                    "Approved for maximum eligible amount of {}",
                    format_rupees(max_loan_amount, 2)
                );
                max_loan_amount
            };
            verdict.approved_amount = approved;
            verdict.monthly_emi =
                terms::monthly_emi(approved, interest_rate, profile.loan_tenure_months);
        }

        verdict
    }
}

/// Outcome of one evaluation; ineligibility is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reason: String,
    pub max_loan_amount: f64,
    pub approved_amount: f64,
    pub interest_rate: f64,
    pub monthly_emi: f64,
}

impl EligibilityVerdict {
    pub fn ineligible(reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: reason.summary(),
            max_loan_amount: 0.0,
            approved_amount: 0.0,
            interest_rate: 0.0,
            monthly_emi: 0.0,
        }
    }
}
