use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState, InMemoryWaitlistRepository};
use crate::routes::with_waitlist_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use resfi::config::AppConfig;
use resfi::error::AppError;
use resfi::registry::WaitlistService;
use resfi::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let repository = Arc::new(InMemoryWaitlistRepository::default());
    let waitlist_service = Arc::new(WaitlistService::new(repository));

    let app = with_waitlist_routes(waitlist_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "waitlist service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
