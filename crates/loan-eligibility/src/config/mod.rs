use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::workflows::eligibility::ScoringConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub reference: ReferenceDataConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let request_timeout_ms = env::var("APP_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u64>()
            .ok()
            .filter(|millis| *millis > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut scoring = ScoringConfig::default();
        if let Ok(raw) = env::var("LOAN_MIN_APPROVAL_LIKELIHOOD") {
            scoring.minimum_approval_likelihood = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|likelihood| *likelihood <= 100)
                .ok_or(ConfigError::InvalidApprovalThreshold { value: raw })?;
        }

        let reference = ReferenceDataConfig {
            validation_rules_path: optional_path("LOAN_VALIDATION_RULES_PATH"),
            products_path: optional_path("LOAN_PRODUCTS_PATH"),
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                request_timeout_ms,
            },
            telemetry: TelemetryConfig { log_level },
            scoring,
            reference,
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional JSON overrides for the validation schema and product catalog.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataConfig {
    pub validation_rules_path: Option<PathBuf>,
    pub products_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidApprovalThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "APP_REQUEST_TIMEOUT_MS must be a positive number of milliseconds")
            }
            ConfigError::InvalidApprovalThreshold { value } => write!(
                f,
                "LOAN_MIN_APPROVAL_LIKELIHOOD must be between 0 and 100, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidApprovalThreshold { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_REQUEST_TIMEOUT_MS");
        env::remove_var("LOAN_MIN_APPROVAL_LIKELIHOOD");
        env::remove_var("LOAN_VALIDATION_RULES_PATH");
        env::remove_var("LOAN_PRODUCTS_PATH");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring, ScoringConfig::default());
        assert!(config.reference.validation_rules_path.is_none());
        assert!(config.reference.products_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_and_reference_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("LOAN_MIN_APPROVAL_LIKELIHOOD", "70");
        env::set_var("LOAN_PRODUCTS_PATH", "/etc/loans/products.json");
        env::set_var("APP_REQUEST_TIMEOUT_MS", "250");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.scoring.minimum_approval_likelihood, 70);
        assert_eq!(
            config.reference.products_path,
            Some(PathBuf::from("/etc/loans/products.json"))
        );
        assert_eq!(config.server.request_timeout(), Duration::from_millis(250));
        reset_env();
    }

    #[test]
    fn rejects_invalid_threshold_and_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOAN_MIN_APPROVAL_LIKELIHOOD", "150");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidApprovalThreshold { .. })
        ));

        reset_env();
        env::set_var("APP_REQUEST_TIMEOUT_MS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));
        reset_env();
    }
}
