use serde::{Deserialize, Serialize};

/// Lending thresholds applied by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub min_age: u32,
    pub max_age: u32,
    pub min_annual_income: f64,
    pub min_credit_score: u16,
    pub max_debt_to_income_ratio: f64,
    /// Annual percentage before credit-tier discounts.
    pub base_interest_rate: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 65,
            min_annual_income: 25_000.0,
            min_credit_score: 650,
            max_debt_to_income_ratio: 0.40,
            base_interest_rate: 8.5,
        }
    }
}
