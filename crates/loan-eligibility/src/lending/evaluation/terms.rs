use super::super::domain::ApplicantProfile;
use super::config::EligibilityPolicy;

/// Income multiple granted for a credit score; the highest tier wins.
pub(crate) fn income_multiplier(credit_score: u16) -> f64 {
    if credit_score >= 750 {
        6.0
    } else if credit_score >= 700 {
        5.5
    } else {
        5.0
    }
}

/// Ceiling bounded by both the income multiple and four years of free income.
pub(crate) fn max_loan_amount(profile: &ApplicantProfile) -> f64 {
    let by_multiple = profile.annual_income * income_multiplier(profile.credit_score);
    let available_income = profile.annual_income - profile.monthly_debt_payments * 12.0;
    by_multiple.min(available_income * 4.0)
}

/// Discount in percentage points off the base rate; the highest tier wins.
pub(crate) fn credit_discount(credit_score: u16) -> f64 {
    if credit_score >= 800 {
        1.5
    } else if credit_score >= 750 {
        1.0
    } else if credit_score >= 700 {
        0.5
    } else {
        0.0
    }
}

pub(crate) fn interest_rate(credit_score: u16, policy: &EligibilityPolicy) -> f64 {
    policy.base_interest_rate - credit_discount(credit_score)
}

/// Equated monthly installment for an amortizing loan, rounded to paise.
pub fn monthly_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }

    let months = f64::from(tenure_months);
    let monthly_rate = annual_rate_percent / (12.0 * 100.0);
    if monthly_rate == 0.0 {
        return round_half_up(principal / months, 2);
    }

    let growth = (1.0 + monthly_rate).powf(months);
    let emi = principal * monthly_rate * growth / (growth - 1.0);
    round_half_up(emi, 2)
}

/// Round half away from zero on the shortest decimal form of `value`, so
/// `1.005` rounds to `1.01` even though its binary value sits just below.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let shifted = format!("{value}e{decimals}")
        .parse::<f64>()
        .unwrap_or(value * scale);
    shifted.round() / scale
}

/// Render an amount as rupees with thousands separators, e.g. `₹2,160,000.00`.
pub fn format_rupees(amount: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}₹{grouped}.{fraction}"),
        None => format!("{sign}₹{grouped}"),
    }
}
