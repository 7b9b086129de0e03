use super::super::affordability::AffordabilityRatios;
use super::super::domain::{
    AffordabilityScore, ApplicantProfile, EligibilityResult, RiskCategory,
};
use super::super::products::{format_rand, LoanProduct};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

/// Strength below which a factor is called out as a weakness.
const WEAK_FACTOR_STRENGTH: f64 = 0.5;

impl ScoreFactor {
    fn strength_phrase(self) -> &'static str {
        match self {
            ScoreFactor::DebtToIncome => "manageable existing debt",
            ScoreFactor::CreditScore => "a strong credit score",
            ScoreFactor::EmploymentStatus => "stable employment income",
            ScoreFactor::EmploymentTenure => "an established employment history",
        }
    }

    fn weakness_phrase(self) -> &'static str {
        match self {
            ScoreFactor::DebtToIncome => "high existing debt relative to income",
            ScoreFactor::CreditScore => "a low credit score",
            ScoreFactor::EmploymentStatus => "no regular employment income",
            ScoreFactor::EmploymentTenure => "a short employment history",
        }
    }
}

pub(crate) fn decide_outcome(
    profile: &ApplicantProfile,
    product: &LoanProduct,
    config: &ScoringConfig,
    components: &[ScoreComponent],
    approval_likelihood: u8,
    affordability: AffordabilityScore,
) -> EligibilityResult {
    let risk_category = RiskCategory::from_likelihood(approval_likelihood);
    let amount_within = product.amount_in_range(profile.requested_amount);
    let term_within = product.term_in_range(profile.loan_term_months);
    let clears_minimum = approval_likelihood >= config.minimum_approval_likelihood;

    let decision_reason = if !amount_within {
        format!(
            "Requested amount of {} is outside the {} range of {} to {}",
            format_rand(profile.requested_amount),
            product.name,
            format_rand(product.min_amount),
            format_rand(product.max_amount)
        )
    } else if !term_within {
        format!(
            "Requested term of {} months is outside the {} range of {} to {} months",
            profile.loan_term_months, product.name, product.min_term, product.max_term
        )
    } else if !clears_minimum {
        let cause = weakest(components)
            .map(|component| component.factor.weakness_phrase())
            .unwrap_or("the overall profile");
        format!(
            "Approval likelihood of {}% is below the {}% minimum, mainly due to {}",
            approval_likelihood, config.minimum_approval_likelihood, cause
        )
    } else if AffordabilityRatios::for_profile(profile).disposable_income <= 0.0 {
        format!(
            "{}, but no disposable income remains to service a new loan, \
             so no amount can be offered",
            approval_summary(components, affordability)
        )
    } else {
        approval_summary(components, affordability)
    };

    EligibilityResult {
        is_eligible: clears_minimum && amount_within && term_within,
        approval_likelihood,
        risk_category,
        decision_reason,
    }
}

fn approval_summary(components: &[ScoreComponent], affordability: AffordabilityScore) -> String {
    let mut strengths = Vec::with_capacity(2);
    if affordability >= AffordabilityScore::Good {
        strengths.push("strong income-to-expense ratio");
    }
    if let Some(component) = strongest(components) {
        strengths.push(component.factor.strength_phrase());
    }

    let mut summary = capitalize(&strengths.join(" and "));
    if let Some(component) = weakest(components) {
        if component.strength() < WEAK_FACTOR_STRENGTH {
            summary.push_str(", although ");
            summary.push_str(component.factor.weakness_phrase());
            summary.push_str(" lowers the outlook");
        }
    }
    summary
}

// Ties keep the earlier factor so the summary is stable.
fn strongest(components: &[ScoreComponent]) -> Option<&ScoreComponent> {
    components.iter().fold(None, |best, component| match best {
        Some(current) if current.strength() >= component.strength() => Some(current),
        _ => Some(component),
    })
}

fn weakest(components: &[ScoreComponent]) -> Option<&ScoreComponent> {
    components.iter().fold(None, |worst, component| match worst {
        Some(current) if current.strength() <= component.strength() => Some(current),
        _ => Some(component),
    })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
