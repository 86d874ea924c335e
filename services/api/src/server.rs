use crate::cli::ServeArgs;
use crate::infra::{load_bank, AppState, QuizCatalog};
use crate::routes::quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use matchmaker::config::AppConfig;
use matchmaker::error::AppError;
use matchmaker::telemetry;
use matchmaker::workflows::catalog::CandidateCatalog;
use matchmaker::workflows::matchmaking::EngineError;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let catalog = QuizCatalog::from_path(config.engine.catalog_path.clone());
    let eligible = catalog.eligible_candidates()?.len();
    if eligible == 0 {
        return Err(EngineError::EmptyCandidatePool.into());
    }
    let bank = load_bank(config.engine.bank_path.as_deref())?;
    info!(
        source = %catalog.describe(),
        eligible,
        bank_version = bank.version(),
        "candidate catalog ready"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        bank,
        catalog: Arc::new(catalog),
        phrase_seed: config.engine.phrase_seed,
    };

    let app = quiz_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "matchmaking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
