use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::eligibility::{
    ComputationError, EligibilityServiceError, ReferenceDataError, ValidationFailure,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Reference(ReferenceDataError),
    Export(csv::Error),
    Input(serde_json::Error),
    Rejected(ValidationFailure),
    Computation(ComputationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Reference(err) => write!(f, "reference data error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Rejected(err) => write!(f, "rejected request: {}", err),
            AppError::Computation(err) => write!(f, "computation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Reference(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Rejected(err) => Some(err),
            AppError::Computation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Input(_) | AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::Reference(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Export(_)
            | AppError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::Reference(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

impl From<EligibilityServiceError> for AppError {
    fn from(value: EligibilityServiceError) -> Self {
        match value {
            EligibilityServiceError::Validation(failure) => Self::Rejected(failure),
            EligibilityServiceError::Reference(reference) => Self::Reference(reference),
            EligibilityServiceError::Computation(computation) => Self::Computation(computation),
        }
    }
}
