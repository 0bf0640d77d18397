use crate::cli::ServeArgs;
use crate::infra::{resolve_artifact_dir, AppState};
use crate::routes::with_prediction_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use focus_score::config::AppConfig;
use focus_score::error::AppError;
use focus_score::prediction::Predictor;
use focus_score::telemetry;
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
    config.model.artifact_dir = resolve_artifact_dir(&config, args.artifact_dir.take());

    telemetry::init(&config.telemetry)?;

    // No artifact, no service: a load failure stops startup here.
    let predictor = Predictor::load(&config.model.artifact_dir)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_prediction_routes(predictor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        artifact_dir = %config.model.artifact_dir.display(),
        "focus score predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
