use serde::{Deserialize, Serialize};

/// Tunable dials for the approval rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Likelihood (0-100) an application must reach to be eligible.
    pub minimum_approval_likelihood: u8,
    /// Tenure in months at which the employment-duration factor is fully earned.
    pub tenure_saturation_months: u32,
    /// Debt-to-income percentage at which the debt factor contributes nothing.
    pub debt_to_income_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            minimum_approval_likelihood: 60,
            tenure_saturation_months: 36,
            debt_to_income_ceiling: 50.0,
        }
    }
}
