use super::amortization::round_cents;
use super::domain::{AffordabilityAnalysis, AffordabilityScore, ApplicantProfile};

/// Disposable share of income (fraction) needed for buckets 3, 2, 1.
const DISPOSABLE_SHARE_BANDS: [f64; 3] = [0.5, 0.3, 0.1];
/// Highest debt-to-income percentage allowed for buckets 3, 2, 1.
const DEBT_TO_INCOME_BANDS: [f64; 3] = [10.0, 20.0, 36.0];
/// Highest loan-to-income percentage allowed for buckets 3, 2, 1.
const LOAN_TO_INCOME_BANDS: [f64; 3] = [40.0, 60.0, 80.0];

/// Raw ratios before rounding, shared with the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AffordabilityRatios {
    pub disposable_income: f64,
    pub debt_to_income: f64,
    pub loan_to_income: f64,
}

impl AffordabilityRatios {
    pub(crate) fn for_profile(profile: &ApplicantProfile) -> Self {
        let income = profile.monthly_income;
        let disposable_income = income - profile.monthly_expenses - profile.existing_debt;
        let debt_to_income = profile.existing_debt / income * 100.0;
        let term_income = income * f64::from(profile.loan_term_months);
        let loan_to_income = profile.requested_amount / term_income * 100.0;

        Self {
            disposable_income,
            debt_to_income,
            loan_to_income,
        }
    }

    fn disposable_share(&self, income: f64) -> f64 {
        self.disposable_income / income
    }
}

pub fn analyse(profile: &ApplicantProfile) -> AffordabilityAnalysis {
    let ratios = AffordabilityRatios::for_profile(profile);
    let affordability_score = band(&ratios, profile.monthly_income);

    AffordabilityAnalysis {
        disposable_income: round_cents(ratios.disposable_income),
        debt_to_income_ratio: round_cents(ratios.debt_to_income),
        loan_to_income_ratio: round_cents(ratios.loan_to_income),
        affordability_score,
    }
}

fn band(ratios: &AffordabilityRatios, income: f64) -> AffordabilityScore {
    if ratios.disposable_income <= 0.0 {
        return AffordabilityScore::Poor;
    }

    let disposable = bucket_at_least(ratios.disposable_share(income), &DISPOSABLE_SHARE_BANDS);
    let debt = bucket_at_most(ratios.debt_to_income, &DEBT_TO_INCOME_BANDS);
    let loan = bucket_at_most(ratios.loan_to_income, &LOAN_TO_INCOME_BANDS);

    AffordabilityScore::from_bucket(disposable.min(debt).min(loan))
}

fn bucket_at_least(value: f64, floors: &[f64; 3]) -> u8 {
    match floors.iter().position(|floor| value >= *floor) {
        Some(index) => 3 - index as u8,
        None => 0,
    }
}

fn bucket_at_most(value: f64, ceilings: &[f64; 3]) -> u8 {
    match ceilings.iter().position(|ceiling| value <= *ceiling) {
        Some(index) => 3 - index as u8,
        None => 0,
    }
}
