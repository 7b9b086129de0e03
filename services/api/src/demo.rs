use crate::infra::{eligibility_service, EligibilityService};
use clap::Args;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::eligibility::products::format_rand;
use loan_eligibility::workflows::eligibility::{
    EligibilityOutcome, EligibilityServiceError, FinancialInfo, LoanApplication, LoanDetails,
    PersonalInfo, RateCalculationRequest, RateQuote, ResultTheme, ValidationFailure,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a loan application JSON document
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the raw response body instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the score breakdown in the summary
    #[arg(long)]
    pub(crate) show_components: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Principal to borrow, in rand
    #[arg(long)]
    pub(crate) amount: f64,
    /// Term in months
    #[arg(long)]
    pub(crate) term: i64,
    /// Applicant credit score (300-850)
    #[arg(long)]
    pub(crate) credit_score: Option<i64>,
    /// Product id from the catalog
    #[arg(long, default_value = "personal_loan")]
    pub(crate) loan_type: String,
    /// Write the repayment schedule to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print every instalment of the schedule
    #[arg(long)]
    pub(crate) show_schedule: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the minimum approval likelihood for this run
    #[arg(long)]
    pub(crate) min_likelihood: Option<u8>,
    /// Include the score breakdown for each applicant
    #[arg(long)]
    pub(crate) show_components: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = eligibility_service(&config)?;

    let file = File::open(&args.input)?;
    let application: LoanApplication = serde_json::from_reader(BufReader::new(file))?;

    let outcome = match service.assess(application) {
        Ok(outcome) => outcome,
        Err(err) => return report_failure(err),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.assessment)?);
    } else {
        render_outcome(&outcome, args.show_components);
    }

    Ok(())
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = eligibility_service(&config)?;

    let request = RateCalculationRequest {
        loan_amount: Some(args.amount),
        loan_term: Some(args.term),
        credit_score: args.credit_score,
        loan_type: Some(args.loan_type.clone()),
    };

    let quote = match service.calculate_rate(request) {
        Ok(quote) => quote,
        Err(err) => return report_failure(err),
    };

    render_quote(&args.loan_type, args.amount, &quote, args.show_schedule);

    if let Some(path) = args.csv {
        let file = File::create(&path)?;
        quote.write_csv(file)?;
        println!("Schedule written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(minimum) = args.min_likelihood {
        config.scoring.minimum_approval_likelihood = minimum.min(100);
    }
    let service = eligibility_service(&config)?;

    println!(
        "Loan eligibility demo (minimum approval likelihood {}%)",
        config.scoring.minimum_approval_likelihood
    );

    for (label, application) in sample_applicants() {
        println!("\n{label}");
        assess_sample(&service, application, args.show_components)?;
    }

    println!("\nRate quote for a R100,000 personal loan over 36 months");
    let quote = service.calculate_rate(RateCalculationRequest {
        loan_amount: Some(100_000.0),
        loan_term: Some(36),
        credit_score: Some(700),
        loan_type: Some("personal_loan".to_string()),
    })?;
    render_quote("personal_loan", 100_000.0, &quote, false);

    Ok(())
}

fn assess_sample(
    service: &EligibilityService,
    application: LoanApplication,
    show_components: bool,
) -> Result<(), AppError> {
    match service.assess(application) {
        Ok(outcome) => {
            render_outcome(&outcome, show_components);
            Ok(())
        }
        // Rejected samples are part of the walkthrough.
        Err(EligibilityServiceError::Validation(failure)) => {
            print_violations(&failure);
            Ok(())
        }
        Err(err) => report_failure(err),
    }
}

fn print_violations(failure: &ValidationFailure) {
    println!("  Validation failed:");
    for detail in &failure.details {
        println!("    - {detail}");
    }
}

/// Prints field violations and hands the failure back so the command exits non-zero.
fn report_failure(err: EligibilityServiceError) -> Result<(), AppError> {
    if let EligibilityServiceError::Validation(failure) = &err {
        print_violations(failure);
    }
    Err(err.into())
}

fn render_outcome(outcome: &EligibilityOutcome, show_components: bool) {
    let result = &outcome.assessment.eligibility_result;
    let loan = &outcome.assessment.recommended_loan;
    let affordability = &outcome.assessment.affordability_analysis;
    let theme = ResultTheme::from_likelihood(result.approval_likelihood);

    println!(
        "  [{}] {} | likelihood {}% | {} risk | product {}",
        theme.label(),
        if result.is_eligible { "eligible" } else { "not eligible" },
        result.approval_likelihood,
        result.risk_category.label(),
        outcome.product_id
    );
    println!("  Reason: {}", result.decision_reason);
    println!(
        "  Offer: {} of up to {} at {:.2}% | R{:.2}/month | R{:.2} total",
        format_rand(loan.recommended_amount),
        format_rand(loan.max_amount),
        loan.interest_rate,
        loan.monthly_payment,
        loan.total_repayment
    );
    println!(
        "  Affordability: {} | disposable R{:.2} | DTI {:.2}% | LTI {:.2}%",
        affordability.affordability_score.label(),
        affordability.disposable_income,
        affordability.debt_to_income_ratio,
        affordability.loan_to_income_ratio
    );

    if show_components {
        println!("  Score components:");
        for component in &outcome.components {
            println!(
                "    - {:?}: {:.1}/{:.0} ({})",
                component.factor, component.points, component.max_points, component.notes
            );
        }
    }
}

fn render_quote(loan_type: &str, amount: f64, quote: &RateQuote, show_schedule: bool) {
    println!(
        "  {} of {} over {} months at {:.2}%",
        loan_type,
        format_rand(amount),
        quote.payment_schedule.len(),
        quote.interest_rate
    );
    println!(
        "  Monthly payment R{:.2} | total interest R{:.2} | total repayment R{:.2}",
        quote.monthly_payment, quote.total_interest, quote.total_repayment
    );

    if show_schedule {
        println!("  Month    Payment  Principal   Interest      Balance");
        for entry in &quote.payment_schedule {
            println!(
                "  {:>5} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
                entry.month, entry.payment, entry.principal, entry.interest, entry.balance
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn applicant(
    age: i64,
    status: &str,
    months_employed: i64,
    income: f64,
    expenses: f64,
    debt: f64,
    credit_score: Option<i64>,
    amount: f64,
    term: i64,
    purpose: &str,
) -> LoanApplication {
    LoanApplication {
        personal_info: PersonalInfo {
            age: Some(age),
            employment_status: Some(status.to_string()),
            employment_duration: Some(months_employed),
        },
        financial_info: FinancialInfo {
            monthly_income: Some(income),
            monthly_expenses: Some(expenses),
            existing_debt: Some(debt),
            credit_score,
        },
        loan_details: LoanDetails {
            requested_amount: Some(amount),
            loan_term: Some(term),
            loan_purpose: Some(purpose.to_string()),
        },
    }
}

fn sample_applicants() -> Vec<(&'static str, LoanApplication)> {
    vec![
        (
            "Salaried professional consolidating debt",
            applicant(
                30,
                "employed",
                24,
                30_000.0,
                10_000.0,
                0.0,
                Some(700),
                150_000.0,
                60,
                "debt_consolidation",
            ),
        ),
        (
            "Self-employed contractor renovating",
            applicant(
                41,
                "self_employed",
                10,
                18_000.0,
                9_000.0,
                3_000.0,
                Some(640),
                80_000.0,
                36,
                "home_improvement",
            ),
        ),
        (
            "Recent graduate without a credit record",
            applicant(
                23,
                "employed",
                4,
                9_000.0,
                6_500.0,
                1_500.0,
                None,
                40_000.0,
                24,
                "education",
            ),
        ),
        (
            "Retiree covering medical costs",
            applicant(
                63,
                "retired",
                120,
                12_000.0,
                8_000.0,
                0.0,
                Some(720),
                30_000.0,
                24,
                "medical",
            ),
        ),
        (
            "Used vehicle purchase",
            applicant(
                35,
                "employed",
                60,
                45_000.0,
                20_000.0,
                4_000.0,
                Some(760),
                220_000.0,
                60,
                "used_vehicle",
            ),
        ),
        (
            "Request below the minimum amount",
            applicant(
                28,
                "employed",
                12,
                15_000.0,
                7_000.0,
                0.0,
                Some(680),
                3_000.0,
                12,
                "other",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::TracingDecisionPublisher;
    use loan_eligibility::workflows::eligibility::{
        ComputationError, LoanEligibilityService, NoopPublisher, ScoringConfig,
        StaticReferenceData,
    };
    use std::sync::Arc;

    fn service() -> LoanEligibilityService<StaticReferenceData, NoopPublisher> {
        LoanEligibilityService::new(
            Arc::new(StaticReferenceData::standard()),
            Arc::new(NoopPublisher),
            ScoringConfig::default(),
        )
    }

    #[test]
    fn sample_applicants_cover_every_outcome() {
        let service = service();
        let mut eligible = 0;
        let mut declined = 0;
        let mut rejected = 0;

        for (_, application) in sample_applicants() {
            match service.assess(application) {
                Ok(outcome) if outcome.assessment.eligibility_result.is_eligible => eligible += 1,
                Ok(_) => declined += 1,
                Err(EligibilityServiceError::Validation(_)) => rejected += 1,
                Err(other) => panic!("unexpected failure: {other}"),
            }
        }

        assert!(eligible >= 1, "at least one sample should be approved");
        assert!(declined >= 1, "at least one sample should be declined");
        assert_eq!(rejected, 1, "only the undersized request fails validation");
    }

    #[test]
    fn computation_failures_are_returned_as_errors() {
        let result = report_failure(EligibilityServiceError::Computation(
            ComputationError::InvalidValue {
                field: "interestRate",
            },
        ));
        assert!(matches!(result, Err(AppError::Computation(_))));
    }

    #[test]
    fn rejected_requests_are_returned_as_errors() {
        let failure = ValidationFailure::new(vec![
            "Loan amount must be between R5,000 and R300,000".to_string(),
        ]);
        let result = report_failure(EligibilityServiceError::Validation(failure.clone()));
        match result {
            Err(AppError::Rejected(rejected)) => assert_eq!(rejected, failure),
            other => panic!("expected rejected request, got {other:?}"),
        }
    }

    #[test]
    fn rejected_samples_do_not_stop_the_walkthrough() {
        let service: EligibilityService = LoanEligibilityService::new(
            Arc::new(StaticReferenceData::standard()),
            Arc::new(TracingDecisionPublisher),
            ScoringConfig::default(),
        );

        for (label, application) in sample_applicants() {
            assert!(
                assess_sample(&service, application, true).is_ok(),
                "sample '{label}' should not abort the walkthrough"
            );
        }
    }

    #[test]
    fn vehicle_sample_uses_vehicle_finance() {
        let service = service();
        let (_, application) = sample_applicants()
            .into_iter()
            .find(|(label, _)| label.contains("vehicle"))
            .expect("vehicle sample present");

        let outcome = service.assess(application).expect("assessment succeeds");
        assert_eq!(outcome.product_id, "vehicle_loan");
    }
}
