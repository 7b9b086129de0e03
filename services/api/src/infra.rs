use loan_eligibility::config::{AppConfig, ReferenceDataConfig};
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::eligibility::{
    DecisionEvent, DecisionEventPublisher, LoanEligibilityService, PublishError,
    StaticReferenceData,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type EligibilityService =
    LoanEligibilityService<StaticReferenceData, TracingDecisionPublisher>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Forwards decision events to the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingDecisionPublisher;

impl DecisionEventPublisher for TracingDecisionPublisher {
    fn publish(&self, event: DecisionEvent) -> Result<(), PublishError> {
        info!(
            event = %event.name,
            occurred_at = %event.occurred_at.to_rfc3339(),
            details = ?event.details,
            "decision event"
        );
        Ok(())
    }
}

pub(crate) fn load_reference(config: &ReferenceDataConfig) -> Result<StaticReferenceData, AppError> {
    let reference = StaticReferenceData::from_paths(
        config.validation_rules_path.as_deref(),
        config.products_path.as_deref(),
    )?;
    Ok(reference)
}

pub(crate) fn eligibility_service(config: &AppConfig) -> Result<EligibilityService, AppError> {
    let reference = load_reference(&config.reference)?;
    Ok(LoanEligibilityService::new(
        Arc::new(reference),
        Arc::new(TracingDecisionPublisher),
        config.scoring.clone(),
    ))
}
