use crate::cli::ServeArgs;
use crate::infra::{eligibility_service, AppState};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let eligibility = Arc::new(eligibility_service(&config)?);

    let app = with_eligibility_routes(eligibility)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        timeout_ms = config.server.request_timeout_ms,
        minimum_likelihood = config.scoring.minimum_approval_likelihood,
        "loan eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
