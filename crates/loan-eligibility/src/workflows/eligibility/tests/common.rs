use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::eligibility::domain::{
    ApplicantProfile, EmploymentStatus, FinancialInfo, LoanApplication, LoanDetails,
    PersonalInfo, RateCalculationRequest,
};
use crate::workflows::eligibility::events::{DecisionEvent, DecisionEventPublisher, PublishError};
use crate::workflows::eligibility::products::{LoanProduct, ProductCatalog};
use crate::workflows::eligibility::reference::{
    ReferenceDataError, ReferenceDataSource, StaticReferenceData,
};
use crate::workflows::eligibility::schema::ValidationSchema;
use crate::workflows::eligibility::{
    eligibility_router, EligibilityEngine, LoanEligibilityService, ScoringConfig,
};

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(scoring_config())
}

pub(super) fn schema() -> ValidationSchema {
    ValidationSchema::standard()
}

pub(super) fn catalog() -> ProductCatalog {
    ProductCatalog::standard()
}

pub(super) fn personal_loan() -> LoanProduct {
    catalog()
        .get("personal_loan")
        .cloned()
        .expect("personal loan in catalog")
}

pub(super) fn vehicle_loan() -> LoanProduct {
    catalog()
        .get("vehicle_loan")
        .cloned()
        .expect("vehicle loan in catalog")
}

/// Salaried applicant with a clean debt position asking for a five-year personal loan.
pub(super) fn application() -> LoanApplication {
    LoanApplication {
        personal_info: PersonalInfo {
            age: Some(30),
            employment_status: Some("employed".to_string()),
            employment_duration: Some(24),
        },
        financial_info: FinancialInfo {
            monthly_income: Some(30_000.0),
            monthly_expenses: Some(10_000.0),
            existing_debt: Some(0.0),
            credit_score: Some(700),
        },
        loan_details: LoanDetails {
            requested_amount: Some(150_000.0),
            loan_term: Some(60),
            loan_purpose: Some("debt_consolidation".to_string()),
        },
    }
}

pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 30,
        employment_status: EmploymentStatus::Employed,
        employment_duration_months: 24,
        monthly_income: 30_000.0,
        monthly_expenses: 10_000.0,
        existing_debt: 0.0,
        credit_score: Some(700),
        requested_amount: 150_000.0,
        loan_term_months: 60,
        loan_purpose: None,
        product_id: "personal_loan".to_string(),
    }
}

pub(super) fn rate_request() -> RateCalculationRequest {
    RateCalculationRequest {
        loan_amount: Some(100_000.0),
        loan_term: Some(36),
        credit_score: Some(700),
        loan_type: Some("personal_loan".to_string()),
    }
}

pub(super) fn build_service() -> (
    LoanEligibilityService<StaticReferenceData, MemoryEvents>,
    Arc<MemoryEvents>,
) {
    let events = Arc::new(MemoryEvents::default());
    let service = LoanEligibilityService::new(
        Arc::new(StaticReferenceData::standard()),
        events.clone(),
        scoring_config(),
    );
    (service, events)
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<DecisionEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }

    pub(super) fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.name).collect()
    }
}

impl DecisionEventPublisher for MemoryEvents {
    fn publish(&self, event: DecisionEvent) -> Result<(), PublishError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct OfflineEvents;

impl DecisionEventPublisher for OfflineEvents {
    fn publish(&self, _event: DecisionEvent) -> Result<(), PublishError> {
        Err(PublishError::Transport("broker offline".to_string()))
    }
}

pub(super) struct UnavailableReference;

impl ReferenceDataSource for UnavailableReference {
    fn validation_schema(&self) -> Result<Arc<ValidationSchema>, ReferenceDataError> {
        Err(ReferenceDataError::Unavailable("rules service offline".to_string()))
    }

    fn product_catalog(&self) -> Result<Arc<ProductCatalog>, ReferenceDataError> {
        Err(ReferenceDataError::Unavailable("catalog service offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn eligibility_router_with_service(
    service: LoanEligibilityService<StaticReferenceData, MemoryEvents>,
) -> axum::Router {
    eligibility_router(Arc::new(service))
}
