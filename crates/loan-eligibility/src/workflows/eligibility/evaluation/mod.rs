mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;

use super::affordability;
use super::amortization::AmortizationSchedule;
use super::domain::{ApplicantProfile, EligibilityAssessment, QuoteTerms};
use super::pricing::{self, RateQuote};
use super::products::LoanProduct;
use super::recommendation::recommend;
use policy::decide_outcome;
use serde::{Deserialize, Serialize};

/// Largest closing balance tolerated on a generated schedule.
const SCHEDULE_TOLERANCE: f64 = 0.01;

/// Stateless evaluator that applies the scoring rubric to a validated profile.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: ScoringConfig,
}

impl EligibilityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        product: &LoanProduct,
    ) -> Result<EligibilityOutcome, ComputationError> {
        let (components, approval_likelihood) = rules::score_profile(profile, &self.config);
        let affordability_analysis = affordability::analyse(profile);

        let eligibility_result = decide_outcome(
            profile,
            product,
            &self.config,
            &components,
            approval_likelihood,
            affordability_analysis.affordability_score,
        );
        let recommended_loan = recommend(profile, product, eligibility_result.risk_category);

        let assessment = EligibilityAssessment {
            eligibility_result,
            recommended_loan,
            affordability_analysis,
        };
        check_assessment(&assessment, product)?;

        Ok(EligibilityOutcome {
            product_id: product.id.clone(),
            assessment,
            components,
        })
    }

    pub fn quote(
        &self,
        product: &LoanProduct,
        terms: &QuoteTerms,
    ) -> Result<RateQuote, ComputationError> {
        let schedule = pricing::schedule_for(product, terms);
        check_schedule(&schedule)?;
        Ok(RateQuote::from_schedule(schedule))
    }
}

/// Factors contributing to the approval likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    DebtToIncome,
    CreditScore,
    EmploymentStatus,
    EmploymentTenure,
}

/// Discrete contribution to the likelihood, kept for audits and CLI output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub max_points: f64,
    pub notes: String,
}

impl ScoreComponent {
    pub(crate) fn new(factor: ScoreFactor, weight: f64, strength: f64, notes: String) -> Self {
        Self {
            factor,
            points: weight * strength,
            max_points: weight,
            notes,
        }
    }

    /// Share of the factor's weight that was earned, 0.0 to 1.0.
    pub fn strength(&self) -> f64 {
        if self.max_points <= 0.0 {
            0.0
        } else {
            self.points / self.max_points
        }
    }
}

/// Engine output: the response body plus the scoring trail behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub product_id: String,
    pub assessment: EligibilityAssessment,
    pub components: Vec<ScoreComponent>,
}

/// Broken arithmetic invariant. Never expected for a validated profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    #[error("computed {field} is not a finite non-negative number")]
    InvalidValue { field: &'static str },
    #[error("recommended amount {recommended:.2} exceeds maximum {maximum:.2}")]
    RecommendationAboveMaximum { recommended: f64, maximum: f64 },
    #[error("repayment schedule closed with a balance of {balance:.2}")]
    ScheduleDidNotClose { balance: f64 },
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ComputationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ComputationError::InvalidValue { field })
    }
}

fn check_assessment(
    assessment: &EligibilityAssessment,
    product: &LoanProduct,
) -> Result<(), ComputationError> {
    let loan = &assessment.recommended_loan;
    non_negative("maxAmount", loan.max_amount)?;
    non_negative("recommendedAmount", loan.recommended_amount)?;
    non_negative("interestRate", loan.interest_rate)?;
    non_negative("monthlyPayment", loan.monthly_payment)?;
    non_negative("totalRepayment", loan.total_repayment)?;

    let affordability = &assessment.affordability_analysis;
    if !affordability.disposable_income.is_finite() {
        return Err(ComputationError::InvalidValue {
            field: "disposableIncome",
        });
    }
    non_negative("debtToIncomeRatio", affordability.debt_to_income_ratio)?;
    non_negative("loanToIncomeRatio", affordability.loan_to_income_ratio)?;

    if loan.recommended_amount > loan.max_amount || loan.max_amount > product.max_amount {
        return Err(ComputationError::RecommendationAboveMaximum {
            recommended: loan.recommended_amount,
            maximum: loan.max_amount.min(product.max_amount),
        });
    }

    Ok(())
}

fn check_schedule(schedule: &AmortizationSchedule) -> Result<(), ComputationError> {
    non_negative("interestRate", schedule.annual_rate)?;
    non_negative("monthlyPayment", schedule.monthly_payment)?;

    let balance = schedule.closing_balance();
    if !balance.is_finite() || balance.abs() > SCHEDULE_TOLERANCE {
        return Err(ComputationError::ScheduleDidNotClose { balance });
    }
    Ok(())
}
