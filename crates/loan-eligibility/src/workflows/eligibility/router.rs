use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{LoanApplication, RateCalculationRequest};
use super::events::DecisionEventPublisher;
use super::reference::ReferenceDataSource;
use super::service::{EligibilityServiceError, LoanEligibilityService};

/// Seconds a client should wait before retrying when reference data is unavailable.
const RETRY_AFTER_SECONDS: &str = "5";

/// Router builder exposing the loan application endpoints.
pub fn eligibility_router<S, P>(service: Arc<LoanEligibilityService<S, P>>) -> Router
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    Router::new()
        .route("/api/loans/eligibility", post(eligibility_handler::<S, P>))
        .route("/api/loans/calculate-rate", post(calculate_rate_handler::<S, P>))
        .route("/api/loans/validation-rules", get(validation_rules_handler::<S, P>))
        .route("/api/loans/products", get(products_handler::<S, P>))
        .with_state(service)
}

pub(crate) async fn eligibility_handler<S, P>(
    State(service): State<Arc<LoanEligibilityService<S, P>>>,
    payload: Result<Json<LoanApplication>, JsonRejection>,
) -> Response
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    let Json(application) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.assess(application) {
        Ok(outcome) => (StatusCode::OK, Json(outcome.assessment)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn calculate_rate_handler<S, P>(
    State(service): State<Arc<LoanEligibilityService<S, P>>>,
    payload: Result<Json<RateCalculationRequest>, JsonRejection>,
) -> Response
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.calculate_rate(request) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn validation_rules_handler<S, P>(
    State(service): State<Arc<LoanEligibilityService<S, P>>>,
) -> Response
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    match service.validation_rules() {
        Ok(schema) => (StatusCode::OK, Json(schema.as_ref())).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn products_handler<S, P>(
    State(service): State<Arc<LoanEligibilityService<S, P>>>,
) -> Response
where
    S: ReferenceDataSource + 'static,
    P: DecisionEventPublisher + 'static,
{
    match service.products() {
        Ok(catalog) => (StatusCode::OK, Json(catalog.as_ref())).into_response(),
        Err(other) => error_response(other),
    }
}

fn malformed_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": "Validation failed",
        "details": [rejection.body_text()],
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn error_response(error: EligibilityServiceError) -> Response {
    match error {
        EligibilityServiceError::Validation(failure) => {
            let payload = json!({
                "error": "Validation failed",
                "details": failure.details,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        EligibilityServiceError::Reference(reference) => {
            error!(error = %reference, "reference data unavailable");
            let payload = json!({
                "error": reference.to_string(),
            });
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [(header::RETRY_AFTER, RETRY_AFTER_SECONDS)],
                Json(payload),
            )
                .into_response()
        }
        EligibilityServiceError::Computation(computation) => {
            error!(error = %computation, "eligibility computation failed");
            let payload = json!({
                "error": computation.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
