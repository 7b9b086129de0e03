use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{LoanApplication, RateCalculationRequest};
use super::evaluation::{ComputationError, EligibilityEngine, EligibilityOutcome, ScoringConfig};
use super::events::{
    DecisionEvent, DecisionEventPublisher, ELIGIBILITY_ASSESSED, RATE_CALCULATED,
    VALIDATION_REJECTED,
};
use super::pricing::RateQuote;
use super::products::ProductCatalog;
use super::reference::{ReferenceDataError, ReferenceDataSource};
use super::schema::ValidationSchema;
use super::validation::{ApplicationValidator, ValidationFailure};

/// Service composing reference data, validation, the scoring engine, and decision events.
pub struct LoanEligibilityService<S, P> {
    reference: Arc<S>,
    events: Arc<P>,
    engine: Arc<EligibilityEngine>,
}

impl<S, P> LoanEligibilityService<S, P>
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    pub fn new(reference: Arc<S>, events: Arc<P>, config: ScoringConfig) -> Self {
        Self {
            reference,
            events,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Validate and score an application against the session's reference data.
    pub fn assess(
        &self,
        application: LoanApplication,
    ) -> Result<EligibilityOutcome, EligibilityServiceError> {
        let schema = self.reference.validation_schema()?;
        let catalog = self.reference.product_catalog()?;
        let validator = ApplicationValidator::new(&schema, &catalog);

        let profile = match validator.profile_from_application(application) {
            Ok(profile) => profile,
            Err(failure) => {
                self.reject("eligibility", &failure);
                return Err(failure.into());
            }
        };

        let product = catalog.get(&profile.product_id).ok_or_else(|| {
            ValidationFailure::new(vec![
                "No loan product is available for the selected loan purpose".to_string(),
            ])
        })?;

        let outcome = self.engine.assess(&profile, product)?;
        let result = &outcome.assessment.eligibility_result;
        info!(
            product = %outcome.product_id,
            eligible = result.is_eligible,
            likelihood = result.approval_likelihood,
            risk = result.risk_category.label(),
            "eligibility assessed"
        );

        let loan = &outcome.assessment.recommended_loan;
        self.emit(
            DecisionEvent::new(ELIGIBILITY_ASSESSED)
                .with_detail("productId", &outcome.product_id)
                .with_detail("isEligible", result.is_eligible)
                .with_detail("approvalLikelihood", result.approval_likelihood)
                .with_detail("riskCategory", result.risk_category.label())
                .with_detail("recommendedAmount", loan.recommended_amount)
                .with_detail(
                    "affordabilityScore",
                    outcome.assessment.affordability_analysis.affordability_score.label(),
                ),
        );

        Ok(outcome)
    }

    /// Quote a rate and full repayment schedule for a product.
    pub fn calculate_rate(
        &self,
        request: RateCalculationRequest,
    ) -> Result<RateQuote, EligibilityServiceError> {
        let schema = self.reference.validation_schema()?;
        let catalog = self.reference.product_catalog()?;
        let validator = ApplicationValidator::new(&schema, &catalog);

        let terms = match validator.quote_terms_from_request(request) {
            Ok(terms) => terms,
            Err(failure) => {
                self.reject("calculate_rate", &failure);
                return Err(failure.into());
            }
        };

        let product = catalog.get(&terms.product_id).ok_or_else(|| {
            ValidationFailure::new(vec![format!("Unknown loan type '{}'", terms.product_id)])
        })?;

        let quote = self.engine.quote(product, &terms)?;
        info!(
            product = %terms.product_id,
            rate = quote.interest_rate,
            term = terms.loan_term_months,
            "rate calculated"
        );

        self.emit(
            DecisionEvent::new(RATE_CALCULATED)
                .with_detail("loanType", &terms.product_id)
                .with_detail("loanAmount", terms.loan_amount)
                .with_detail("loanTerm", terms.loan_term_months)
                .with_detail("interestRate", quote.interest_rate),
        );

        Ok(quote)
    }

    pub fn validation_rules(&self) -> Result<Arc<ValidationSchema>, EligibilityServiceError> {
        Ok(self.reference.validation_schema()?)
    }

    pub fn products(&self) -> Result<Arc<ProductCatalog>, EligibilityServiceError> {
        Ok(self.reference.product_catalog()?)
    }

    fn reject(&self, operation: &str, failure: &ValidationFailure) {
        debug!(operation, details = ?failure.details, "request rejected by validation");
        self.emit(
            DecisionEvent::new(VALIDATION_REJECTED)
                .with_detail("operation", operation)
                .with_detail("violations", failure.details.len()),
        );
    }

    fn emit(&self, event: DecisionEvent) {
        let name = event.name.clone();
        if let Err(error) = self.events.publish(event) {
            warn!(event = %name, %error, "failed to publish decision event");
        }
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Reference(#[from] ReferenceDataError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
