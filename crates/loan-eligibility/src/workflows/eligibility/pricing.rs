use std::io::Write;

use serde::{Deserialize, Serialize};

use super::amortization::{round_cents, write_entries_csv, AmortizationSchedule, ScheduleEntry};
use super::domain::{QuoteTerms, RiskCategory};
use super::products::LoanProduct;

/// Credit score to position inside a product's rate range (0 = min rate, 1 = max rate).
/// Interpolated linearly between points; 700 lands a quarter of the way up the range.
const CREDIT_POSITION_CURVE: [(f64, f64); 6] = [
    (300.0, 1.0),
    (600.0, 0.65),
    (650.0, 0.45),
    (700.0, 0.25),
    (750.0, 0.15),
    (850.0, 0.0),
];

const UNSCORED_POSITION: f64 = 0.5;

fn credit_position(credit_score: Option<u16>) -> f64 {
    let Some(score) = credit_score else {
        return UNSCORED_POSITION;
    };
    let score = f64::from(score);

    let (first_score, first_position) = CREDIT_POSITION_CURVE[0];
    if score <= first_score {
        return first_position;
    }

    for window in CREDIT_POSITION_CURVE.windows(2) {
        let (low_score, low_position) = window[0];
        let (high_score, high_position) = window[1];
        if score <= high_score {
            let weight = (score - low_score) / (high_score - low_score);
            return low_position + (high_position - low_position) * weight;
        }
    }

    0.0
}

fn risk_premium(risk: Option<RiskCategory>) -> f64 {
    match risk {
        None | Some(RiskCategory::Low) => 0.0,
        Some(RiskCategory::Medium) => 0.10,
        Some(RiskCategory::High) => 0.25,
    }
}

/// Annual percentage rate for an applicant inside the product's range.
pub fn annual_rate(product: &LoanProduct, credit_score: Option<u16>, risk: Option<RiskCategory>) -> f64 {
    let range = product.interest_rate_range;
    let position = (credit_position(credit_score) + risk_premium(risk)).clamp(0.0, 1.0);
    round_cents(range.min + range.spread() * position)
}

/// Response body for a rate calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_repayment: f64,
    pub payment_schedule: Vec<ScheduleEntry>,
}

impl RateQuote {
    pub fn from_schedule(schedule: AmortizationSchedule) -> Self {
        Self {
            interest_rate: schedule.annual_rate,
            monthly_payment: schedule.monthly_payment,
            total_interest: schedule.total_interest(),
            total_repayment: schedule.total_repayment(),
            payment_schedule: schedule.entries,
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_entries_csv(&self.payment_schedule, writer)
    }
}

/// Price validated terms and lay out the full repayment schedule.
pub fn schedule_for(product: &LoanProduct, terms: &QuoteTerms) -> AmortizationSchedule {
    let rate = annual_rate(product, terms.credit_score, None);
    AmortizationSchedule::build(terms.loan_amount, rate, terms.loan_term_months)
}
