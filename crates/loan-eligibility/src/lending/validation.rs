use std::collections::BTreeMap;

use super::domain::{ApplicantProfile, ApplicationSubmission};

const MIN_REPORTED_CREDIT_SCORE: u16 = 300;
const MAX_REPORTED_CREDIT_SCORE: u16 = 850;
const MIN_REQUESTED_AMOUNT: f64 = 1_000.0;
const MIN_TENURE_MONTHS: u32 = 6;
const MAX_TENURE_MONTHS: u32 = 360;

/// Field-level problems found before a request reaches the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: BTreeMap<String, String>,
}

/// Structural checks on inbound payloads.
///
/// Age is not checked here: an applicant outside the lending age band gets
/// an ineligible verdict, not a validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn check_profile(&self, profile: &ApplicantProfile) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        collect_profile_errors(profile, &mut errors);
        finish(errors)
    }

    pub fn check_submission(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        collect_profile_errors(&submission.profile, &mut errors);

        if submission.email.trim().is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        } else if !looks_like_email(submission.email.trim()) {
            errors.insert("email".to_string(), "Email should be valid".to_string());
        }

        if submission.phone.trim().is_empty() {
            errors.insert("phone".to_string(), "Phone is required".to_string());
        }

        finish(errors)
    }
}

fn collect_profile_errors(profile: &ApplicantProfile, errors: &mut BTreeMap<String, String>) {
    if profile.name.trim().is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }

    if !profile.annual_income.is_finite() || profile.annual_income < 0.0 {
        errors.insert(
            "annualIncome".to_string(),
            "Annual income must be positive".to_string(),
        );
    }

    if !(MIN_REPORTED_CREDIT_SCORE..=MAX_REPORTED_CREDIT_SCORE).contains(&profile.credit_score) {
        errors.insert(
            "creditScore".to_string(),
            format!(
                "Credit score must be between {MIN_REPORTED_CREDIT_SCORE} and {MAX_REPORTED_CREDIT_SCORE}"
            ),
        );
    }

    if !profile.monthly_debt_payments.is_finite() || profile.monthly_debt_payments < 0.0 {
        errors.insert(
            "monthlyDebtPayments".to_string(),
            "Monthly debt payments cannot be negative".to_string(),
        );
    }

    if !profile.requested_amount.is_finite() || profile.requested_amount < MIN_REQUESTED_AMOUNT {
        errors.insert(
            "requestedAmount".to_string(),
            format!("Requested amount must be at least {MIN_REQUESTED_AMOUNT:.0}"),
        );
    }

    if profile.loan_tenure_months < MIN_TENURE_MONTHS {
        errors.insert(
            "loanTenure".to_string(),
            format!("Loan tenure must be at least {MIN_TENURE_MONTHS} months"),
        );
    } else if profile.loan_tenure_months > MAX_TENURE_MONTHS {
        errors.insert(
            "loanTenure".to_string(),
            format!("Loan tenure must be at most {MAX_TENURE_MONTHS} months"),
        );
    }

    if profile.employment_type.trim().is_empty() {
        errors.insert(
            "employmentType".to_string(),
            "Employment type is required".to_string(),
        );
    }
}

fn finish(errors: BTreeMap<String, String>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn looks_like_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !candidate.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}
