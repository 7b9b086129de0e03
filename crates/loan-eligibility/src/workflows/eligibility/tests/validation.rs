use super::common::*;
use crate::workflows::eligibility::domain::{
    EmploymentStatus, LoanApplication, LoanPurpose, RateCalculationRequest,
};
use crate::workflows::eligibility::validation::ApplicationValidator;

fn details_for(application: LoanApplication) -> Vec<String> {
    let schema = schema();
    let catalog = catalog();
    ApplicationValidator::new(&schema, &catalog)
        .profile_from_application(application)
        .expect_err("application should be rejected")
        .details
}

fn quote_details_for(request: RateCalculationRequest) -> Vec<String> {
    let schema = schema();
    let catalog = catalog();
    ApplicationValidator::new(&schema, &catalog)
        .quote_terms_from_request(request)
        .expect_err("request should be rejected")
        .details
}

#[test]
fn valid_application_becomes_typed_profile() {
    let schema = schema();
    let catalog = catalog();
    let profile = ApplicationValidator::new(&schema, &catalog)
        .profile_from_application(application())
        .expect("valid application");

    assert_eq!(profile.age, 30);
    assert_eq!(profile.employment_status, EmploymentStatus::Employed);
    assert_eq!(profile.employment_duration_months, 24);
    assert_eq!(profile.credit_score, Some(700));
    assert_eq!(profile.loan_term_months, 60);
    assert_eq!(profile.loan_purpose, Some(LoanPurpose::DebtConsolidation));
    assert_eq!(profile.product_id, "personal_loan");
}

#[test]
fn amount_below_minimum_reports_the_field_message() {
    let mut application = application();
    application.loan_details.requested_amount = Some(3_000.0);

    assert_eq!(
        details_for(application),
        vec!["Loan amount must be between R5,000 and R300,000".to_string()]
    );
}

#[test]
fn every_violation_is_collected_once_per_field() {
    let mut application = application();
    application.personal_info.age = Some(17);
    application.personal_info.employment_duration = Some(1);
    application.financial_info.monthly_income = Some(2_000.0);
    application.financial_info.credit_score = Some(900);
    application.loan_details.loan_term = Some(72);

    assert_eq!(
        details_for(application),
        vec![
            "Age must be between 18 and 65".to_string(),
            "Minimum 3 months employment required".to_string(),
            "Minimum monthly income of R5,000 required".to_string(),
            "Credit score must be between 300 and 850".to_string(),
            "Loan term must be between 6 and 60 months".to_string(),
        ]
    );
}

#[test]
fn missing_required_fields_use_rule_messages() {
    let details = details_for(LoanApplication::default());

    assert_eq!(
        details,
        vec![
            "Age must be between 18 and 65".to_string(),
            "Please select your employment status".to_string(),
            "Minimum 3 months employment required".to_string(),
            "Minimum monthly income of R5,000 required".to_string(),
            "Please enter your monthly expenses".to_string(),
            "Loan amount must be between R5,000 and R300,000".to_string(),
            "Loan term must be between 6 and 60 months".to_string(),
        ]
    );
}

#[test]
fn optional_fields_default_when_absent() {
    let mut application = application();
    application.financial_info.existing_debt = None;
    application.financial_info.credit_score = None;
    application.loan_details.loan_purpose = None;

    let schema = schema();
    let catalog = catalog();
    let profile = ApplicationValidator::new(&schema, &catalog)
        .profile_from_application(application)
        .expect("optional fields may be blank");

    assert_eq!(profile.existing_debt, 0.0);
    assert_eq!(profile.credit_score, None);
    assert_eq!(profile.loan_purpose, None);
    assert_eq!(profile.product_id, "personal_loan");
}

#[test]
fn negative_amounts_are_rejected() {
    let mut application = application();
    application.financial_info.monthly_expenses = Some(-1.0);
    application.financial_info.existing_debt = Some(-500.0);

    assert_eq!(
        details_for(application),
        vec![
            "Please enter your monthly expenses".to_string(),
            "Existing debt cannot be negative".to_string(),
        ]
    );
}

#[test]
fn unknown_status_and_purpose_are_rejected() {
    let mut application = application();
    application.personal_info.employment_status = Some("contractor".to_string());
    application.loan_details.loan_purpose = Some("holiday".to_string());

    assert_eq!(
        details_for(application),
        vec![
            "Please select your employment status".to_string(),
            "Please select a valid loan purpose".to_string(),
        ]
    );
}

#[test]
fn vehicle_purposes_route_to_vehicle_finance() {
    let mut application = application();
    application.loan_details.loan_purpose = Some("used_vehicle".to_string());
    application.loan_details.requested_amount = Some(120_000.0);

    let schema = schema();
    let catalog = catalog();
    let profile = ApplicationValidator::new(&schema, &catalog)
        .profile_from_application(application)
        .expect("valid vehicle application");

    assert_eq!(profile.product_id, "vehicle_loan");
}

#[test]
fn rate_request_is_bounded_by_product() {
    let mut request = rate_request();
    request.loan_amount = Some(3_000.0);
    request.loan_term = Some(90);

    assert_eq!(
        quote_details_for(request),
        vec![
            "Loan amount must be between R5,000 and R300,000".to_string(),
            "Loan term must be between 6 and 60 months".to_string(),
        ]
    );
}

#[test]
fn rate_request_reports_missing_fields() {
    let details = quote_details_for(RateCalculationRequest::default());
    assert_eq!(
        details,
        vec![
            "Loan type is required".to_string(),
            "Loan amount is required".to_string(),
            "Loan term is required".to_string(),
        ]
    );
}

#[test]
fn rate_request_rejects_unknown_product_and_bad_credit() {
    let mut request = rate_request();
    request.loan_type = Some("boat_loan".to_string());
    request.credit_score = Some(120);

    assert_eq!(
        quote_details_for(request),
        vec![
            "Unknown loan type 'boat_loan'".to_string(),
            "Credit score must be between 300 and 850".to_string(),
        ]
    );
}

#[test]
fn valid_rate_request_becomes_quote_terms() {
    let schema = schema();
    let catalog = catalog();
    let terms = ApplicationValidator::new(&schema, &catalog)
        .quote_terms_from_request(rate_request())
        .expect("valid request");

    assert_eq!(terms.product_id, "personal_loan");
    assert_eq!(terms.loan_term_months, 36);
    assert_eq!(terms.credit_score, Some(700));
}
