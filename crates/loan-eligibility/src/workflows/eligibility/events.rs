use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event names emitted by the eligibility service.
pub const ELIGIBILITY_ASSESSED: &str = "eligibility_assessed";
pub const VALIDATION_REJECTED: &str = "validation_rejected";
pub const RATE_CALCULATED: &str = "rate_calculated";

/// Outbound decision hook (analytics, audit log, message bus).
pub trait DecisionEventPublisher: Send + Sync {
    fn publish(&self, event: DecisionEvent) -> Result<(), PublishError>;
}

/// Flat analytics payload describing one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEvent {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
    pub details: BTreeMap<String, String>,
}

impl DecisionEvent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            occurred_at: Utc::now(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl ToString) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Publisher that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl DecisionEventPublisher for NoopPublisher {
    fn publish(&self, _event: DecisionEvent) -> Result<(), PublishError> {
        Ok(())
    }
}
