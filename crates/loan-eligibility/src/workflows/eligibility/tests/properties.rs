use super::common::*;
use crate::workflows::eligibility::amortization::AmortizationSchedule;
use crate::workflows::eligibility::domain::{
    EmploymentStatus, ResultTheme, RiskCategory, LOW_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
};
use proptest::prelude::*;

fn likelihood(profile: &crate::workflows::eligibility::domain::ApplicantProfile) -> u8 {
    engine()
        .assess(profile, &personal_loan())
        .expect("assessment succeeds")
        .assessment
        .eligibility_result
        .approval_likelihood
}

fn employment_status() -> impl Strategy<Value = EmploymentStatus> {
    prop_oneof![
        Just(EmploymentStatus::Employed),
        Just(EmploymentStatus::SelfEmployed),
        Just(EmploymentStatus::Unemployed),
        Just(EmploymentStatus::Retired),
    ]
}

#[test]
fn risk_bands_match_result_theme_bands() {
    for value in 0..=100u8 {
        let expected = match RiskCategory::from_likelihood(value) {
            RiskCategory::Low => ResultTheme::Success,
            RiskCategory::Medium => ResultTheme::Warning,
            RiskCategory::High => ResultTheme::Danger,
        };
        assert_eq!(ResultTheme::from_likelihood(value), expected, "likelihood {value}");
    }

    assert_eq!(RiskCategory::from_likelihood(LOW_RISK_THRESHOLD), RiskCategory::Low);
    assert_eq!(
        RiskCategory::from_likelihood(LOW_RISK_THRESHOLD - 1),
        RiskCategory::Medium
    );
    assert_eq!(
        RiskCategory::from_likelihood(MEDIUM_RISK_THRESHOLD),
        RiskCategory::Medium
    );
    assert_eq!(
        RiskCategory::from_likelihood(MEDIUM_RISK_THRESHOLD - 1),
        RiskCategory::High
    );
}

proptest! {
    #[test]
    fn likelihood_never_drops_as_credit_improves(
        low in 300u16..=850,
        bump in 0u16..=550,
        status in employment_status(),
        tenure in 0u32..=120,
        debt in 0.0f64..20_000.0,
    ) {
        let high = (low + bump).min(850);
        let mut profile = profile();
        profile.employment_status = status;
        profile.employment_duration_months = tenure;
        profile.existing_debt = debt;

        profile.credit_score = Some(low);
        let worse = likelihood(&profile);
        profile.credit_score = Some(high);
        let better = likelihood(&profile);

        prop_assert!(better >= worse, "credit {low} -> {worse}, credit {high} -> {better}");
    }

    #[test]
    fn likelihood_never_rises_with_more_debt(
        debt in 0.0f64..30_000.0,
        extra in 0.0f64..30_000.0,
        credit in proptest::option::of(300u16..=850),
        status in employment_status(),
    ) {
        let mut profile = profile();
        profile.credit_score = credit;
        profile.employment_status = status;

        profile.existing_debt = debt;
        let lighter = likelihood(&profile);
        profile.existing_debt = debt + extra;
        let heavier = likelihood(&profile);

        prop_assert!(heavier <= lighter, "debt {debt} -> {lighter}, debt {} -> {heavier}", debt + extra);
    }

    #[test]
    fn recommendation_stays_within_bounds(
        income in 5_000.0f64..200_000.0,
        expenses in 0.0f64..150_000.0,
        amount in 5_000.0f64..1_000_000.0,
        term in 6u32..=60,
        credit in proptest::option::of(300u16..=850),
    ) {
        let mut profile = profile();
        profile.monthly_income = income;
        profile.monthly_expenses = expenses;
        profile.requested_amount = amount;
        profile.loan_term_months = term;
        profile.credit_score = credit;

        let product = personal_loan();
        let outcome = engine().assess(&profile, &product).expect("assessment succeeds");
        let loan = &outcome.assessment.recommended_loan;

        prop_assert!(loan.recommended_amount <= loan.max_amount);
        prop_assert!(loan.max_amount <= product.max_amount);
        prop_assert!(loan.interest_rate >= product.interest_rate_range.min);
        prop_assert!(loan.interest_rate <= product.interest_rate_range.max);
        prop_assert!(outcome.assessment.eligibility_result.approval_likelihood <= 100);
    }

    #[test]
    fn schedule_retires_principal_to_the_cent(
        principal in 1_000.0f64..1_500_000.0,
        rate in 0.0f64..25.0,
        term in 1u32..=84,
    ) {
        let schedule = AmortizationSchedule::build(principal, rate, term);

        prop_assert_eq!(schedule.entries.len(), term as usize);
        prop_assert!(schedule.closing_balance().abs() <= 0.01);
        prop_assert!((schedule.principal_paid() - schedule.principal).abs() <= 0.01);
        prop_assert!(schedule.entries.iter().all(|entry| entry.balance >= 0.0));
    }
}
