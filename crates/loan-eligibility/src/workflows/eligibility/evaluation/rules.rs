use super::super::affordability::AffordabilityRatios;
use super::super::domain::{ApplicantProfile, EmploymentStatus};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

const CREDIT_WEIGHT: f64 = 40.0;
const EMPLOYMENT_STATUS_WEIGHT: f64 = 20.0;
const EMPLOYMENT_TENURE_WEIGHT: f64 = 15.0;
const DEBT_TO_INCOME_WEIGHT: f64 = 25.0;

const CREDIT_FLOOR: f64 = 300.0;
const CREDIT_CEILING: f64 = 850.0;

fn status_strength(status: EmploymentStatus) -> f64 {
    match status {
        EmploymentStatus::Employed => 1.0,
        EmploymentStatus::SelfEmployed => 0.8,
        EmploymentStatus::Retired => 0.5,
        EmploymentStatus::Unemployed => 0.0,
    }
}

/// Score each rubric factor. Components come back in `ScoreFactor` order.
pub(crate) fn score_profile(
    profile: &ApplicantProfile,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, u8) {
    let ratios = AffordabilityRatios::for_profile(profile);
    let mut components = Vec::with_capacity(4);

    let ceiling = config.debt_to_income_ceiling.max(f64::EPSILON);
    let debt_strength = (1.0 - ratios.debt_to_income / ceiling).clamp(0.0, 1.0);
    components.push(ScoreComponent::new(
        ScoreFactor::DebtToIncome,
        DEBT_TO_INCOME_WEIGHT,
        debt_strength,
        format!(
            "debt-to-income {:.1}% against a {:.0}% ceiling",
            ratios.debt_to_income, config.debt_to_income_ceiling
        ),
    ));

    match profile.credit_score {
        Some(score) => {
            let strength =
                ((f64::from(score) - CREDIT_FLOOR) / (CREDIT_CEILING - CREDIT_FLOOR)).clamp(0.0, 1.0);
            components.push(ScoreComponent::new(
                ScoreFactor::CreditScore,
                CREDIT_WEIGHT,
                strength,
                format!("credit score {score}"),
            ));
        }
        None => components.push(ScoreComponent::new(
            ScoreFactor::CreditScore,
            CREDIT_WEIGHT,
            0.5,
            "no credit score supplied".to_string(),
        )),
    }

    components.push(ScoreComponent::new(
        ScoreFactor::EmploymentStatus,
        EMPLOYMENT_STATUS_WEIGHT,
        status_strength(profile.employment_status),
        format!("employment status {}", profile.employment_status.as_str()),
    ));

    let saturation = config.tenure_saturation_months.max(1);
    let tenure_strength =
        f64::from(profile.employment_duration_months.min(saturation)) / f64::from(saturation);
    components.push(ScoreComponent::new(
        ScoreFactor::EmploymentTenure,
        EMPLOYMENT_TENURE_WEIGHT,
        tenure_strength,
        format!(
            "{} months employed of {} counted",
            profile.employment_duration_months, saturation
        ),
    ));

    let composite: f64 = components.iter().map(|component| component.points).sum();
    let likelihood = composite.round().clamp(0.0, 100.0) as u8;

    (components, likelihood)
}
