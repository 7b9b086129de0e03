use super::affordability::AffordabilityRatios;
use super::amortization::{floor_cents, max_principal, monthly_payment, round_cents};
use super::domain::{ApplicantProfile, RecommendedLoan, RiskCategory};
use super::pricing::annual_rate;
use super::products::LoanProduct;

/// Size and price an offer the applicant's disposable income can carry.
///
/// The ceiling is what the whole disposable income would service at the product's
/// highest rate, capped by the product maximum. The recommendation never exceeds the
/// requested amount or that ceiling.
pub fn recommend(
    profile: &ApplicantProfile,
    product: &LoanProduct,
    risk: RiskCategory,
) -> RecommendedLoan {
    let term = profile.loan_term_months;
    let disposable = AffordabilityRatios::for_profile(profile)
        .disposable_income
        .max(0.0);

    let serviceable = max_principal(disposable, product.interest_rate_range.max, term);
    let max_amount = floor_cents(serviceable.min(product.max_amount).max(0.0));
    let recommended_amount = floor_cents(profile.requested_amount.min(max_amount).max(0.0));

    let interest_rate = annual_rate(product, profile.credit_score, Some(risk));
    let payment = round_cents(monthly_payment(recommended_amount, interest_rate, term));

    RecommendedLoan {
        max_amount,
        recommended_amount,
        interest_rate,
        monthly_payment: payment,
        total_repayment: round_cents(payment * f64::from(term)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::eligibility::domain::EmploymentStatus;
    use crate::workflows::eligibility::products::ProductCatalog;
    use approx::assert_abs_diff_eq;

    fn personal_loan() -> LoanProduct {
        ProductCatalog::standard()
            .get("personal_loan")
            .cloned()
            .expect("personal loan in catalog")
    }

    fn profile(income: f64, expenses: f64, amount: f64, term: u32) -> ApplicantProfile {
        ApplicantProfile {
            age: 30,
            employment_status: EmploymentStatus::Employed,
            employment_duration_months: 24,
            monthly_income: income,
            monthly_expenses: expenses,
            existing_debt: 0.0,
            credit_score: Some(700),
            requested_amount: amount,
            loan_term_months: term,
            loan_purpose: None,
            product_id: "personal_loan".to_string(),
        }
    }

    #[test]
    fn ample_income_is_capped_by_product_maximum() {
        let offer = recommend(
            &profile(30_000.0, 10_000.0, 150_000.0, 60),
            &personal_loan(),
            RiskCategory::Low,
        );

        assert_abs_diff_eq!(offer.max_amount, 300_000.0);
        assert_abs_diff_eq!(offer.recommended_amount, 150_000.0);
        assert_abs_diff_eq!(offer.interest_rate, 12.5);
        assert_abs_diff_eq!(
            offer.total_repayment,
            offer.monthly_payment * 60.0,
            epsilon = 0.01
        );
    }

    #[test]
    fn thin_disposable_income_shrinks_the_offer() {
        let offer = recommend(
            &profile(8_000.0, 7_000.0, 100_000.0, 24),
            &personal_loan(),
            RiskCategory::Medium,
        );

        assert!(offer.max_amount < 100_000.0);
        assert_abs_diff_eq!(offer.recommended_amount, offer.max_amount);
        assert!(offer.monthly_payment <= 1_000.0 + 0.01);
    }

    #[test]
    fn no_disposable_income_means_no_offer() {
        let offer = recommend(
            &profile(6_000.0, 7_000.0, 20_000.0, 12),
            &personal_loan(),
            RiskCategory::High,
        );

        assert_abs_diff_eq!(offer.max_amount, 0.0);
        assert_abs_diff_eq!(offer.recommended_amount, 0.0);
        assert_abs_diff_eq!(offer.monthly_payment, 0.0);
    }
}
