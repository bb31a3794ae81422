use crate::cli::ServeArgs;
use crate::infra::{resolve_buckets, AppState, DEFAULT_TREND_MONTHS};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cx_scorecard::config::AppConfig;
use cx_scorecard::dashboard::{DashboardService, InMemorySource};
use cx_scorecard::dataset::DatasetImporter;
use cx_scorecard::error::AppError;
use cx_scorecard::scoring::ScorecardEngine;
use cx_scorecard::telemetry;
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
    if let Some(dir) = args.data_dir.take() {
        config.data.data_dir = dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = DatasetImporter::from_dir(&config.data.data_dir)?;
    let buckets = resolve_buckets(
        Vec::new(),
        &config.scoring.trend_buckets,
        &dataset,
        DEFAULT_TREND_MONTHS,
    );
    info!(
        data_dir = %config.data.data_dir.display(),
        entities = dataset.entities.len(),
        services = dataset.services.len(),
        reviews = dataset.service_reviews.len(),
        ratings = dataset.channel_ratings.len(),
        buckets = buckets.len(),
        "dataset loaded"
    );

    let engine = ScorecardEngine::new(config.scoring.clone().with_trend_buckets(buckets));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(InMemorySource::new(dataset)),
        engine,
    ));

    let app = with_dashboard_routes(dashboard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scorecard dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
