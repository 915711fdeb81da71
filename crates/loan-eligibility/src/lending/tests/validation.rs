use super::common::*;
use crate::lending::validation::RequestValidator;

#[test]
fn well_formed_submission_passes() {
    let validator = RequestValidator;
    assert!(validator.check_submission(&submission("asha@example.com")).is_ok());
}

#[test]
fn blank_name_and_out_of_range_credit_score_are_reported_together() {
    let mut profile = salaried_profile();
    profile.name = "   ".to_string();
    profile.credit_score = 900;

    let error = RequestValidator
        .check_profile(&profile)
        .expect_err("profile is invalid");

    assert_eq!(error.errors.len(), 2);
    assert_eq!(error.errors["name"], "Name is required");
    assert!(error.errors["creditScore"].contains("300"));
}

#[test]
fn out_of_range_age_is_left_to_the_evaluator() {
    let mut profile = salaried_profile();
    profile.age = 90;

    assert!(RequestValidator.check_profile(&profile).is_ok());
}

#[test]
fn amounts_must_be_finite_and_positive() {
    let mut profile = salaried_profile();
    profile.annual_income = -1.0;
    profile.monthly_debt_payments = f64::NAN;
    profile.requested_amount = 0.0;
    profile.loan_tenure_months = 0;

    let error = RequestValidator
        .check_profile(&profile)
        .expect_err("amounts are invalid");

    for field in [
        "annualIncome",
        "monthlyDebtPayments",
        "requestedAmount",
        "loanTenure",
    ] {
        assert!(error.errors.contains_key(field), "missing error for {field}");
    }
}

#[test]
fn submission_requires_contact_details() {
    let mut submission = submission("not-an-email");
    submission.phone = String::new();

    let error = RequestValidator
        .check_submission(&submission)
        .expect_err("contact details are invalid");

    assert_eq!(error.errors["email"], "Email should be valid");
    assert_eq!(error.errors["phone"], "Phone is required");
    assert_eq!(error.to_string(), "validation failed for 2 field(s)");
}

#[test]
fn requested_amount_has_a_floor_of_one_thousand() {
    let mut profile = salaried_profile();
    profile.requested_amount = 999.99;

    let error = RequestValidator
        .check_profile(&profile)
        .expect_err("amount is too small");
    assert_eq!(
        error.errors["requestedAmount"],
        "Requested amount must be at least 1000"
    );

    profile.requested_amount = 1_000.0;
    assert!(RequestValidator.check_profile(&profile).is_ok());
}

#[test]
fn tenure_must_fall_between_six_and_three_hundred_sixty_months() {
    let mut profile = salaried_profile();

    for (months, message) in [
        (1, "Loan tenure must be at least 6 months"),
        (5, "Loan tenure must be at least 6 months"),
        (361, "Loan tenure must be at most 360 months"),
        (10_000, "Loan tenure must be at most 360 months"),
    ] {
        profile.loan_tenure_months = months;
        let error = RequestValidator
            .check_profile(&profile)
            .expect_err("tenure is out of bounds");
        assert_eq!(error.errors["loanTenure"], message, "tenure {months}");
    }

    for months in [6, 60, 360] {
        profile.loan_tenure_months = months;
        assert!(
            RequestValidator.check_profile(&profile).is_ok(),
            "tenure {months}"
        );
    }
}
