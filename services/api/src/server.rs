use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAnalytics, InMemoryCaseStore};
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wellness_triage::config::AppConfig;
use wellness_triage::error::AppError;
use wellness_triage::telemetry;
use wellness_triage::workflows::triage::TriageService;

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

    let store = Arc::new(InMemoryCaseStore::default());
    let analytics = Arc::new(InMemoryAnalytics::default());
    let service = Arc::new(TriageService::new(store, analytics, config.triage.clone()));

    let app = with_triage_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        low_confidence_threshold = config.triage.low_confidence_threshold,
        "wellness triage service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
