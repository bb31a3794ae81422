use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use super::service::{DashboardError, DashboardService};
use super::source::DatasetSource;
use crate::error::AppError;
use crate::scoring::domain::EntityId;

/// Router builder exposing the read-only dashboard endpoints.
pub fn dashboard_router<S>(service: Arc<DashboardService<S>>) -> Router
where
    S: DatasetSource + 'static,
{
    Router::new()
        .route("/api/v1/entities", get(entities_handler::<S>))
        .route(
            "/api/v1/entities/:entity_id/scorecard",
            get(scorecard_handler::<S>),
        )
        .route("/api/v1/entities/:entity_id/trend", get(trend_handler::<S>))
        .route("/api/v1/journeys/trend", get(journey_trend_handler::<S>))
        .with_state(service)
}

pub(crate) async fn entities_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
) -> Response
where
    S: DatasetSource + 'static,
{
    respond(move || service.entities()).await
}

pub(crate) async fn scorecard_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Path(entity_id): Path<String>,
) -> Response
where
    S: DatasetSource + 'static,
{
    respond(move || service.scorecard(&EntityId(entity_id))).await
}

pub(crate) async fn trend_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Path(entity_id): Path<String>,
) -> Response
where
    S: DatasetSource + 'static,
{
    respond(move || service.trend(&EntityId(entity_id))).await
}

pub(crate) async fn journey_trend_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
) -> Response
where
    S: DatasetSource + 'static,
{
    respond(move || service.journey_trends()).await
}

/// Runs a dashboard call on the blocking pool, since sources may read files.
async fn respond<T, F>(work: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> Result<T, DashboardError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(body)) => (StatusCode::OK, axum::Json(body)).into_response(),
        Ok(Err(error)) => AppError::from(error).into_response(),
        Err(join_error) => {
            let error = std::io::Error::new(std::io::ErrorKind::Other, join_error);
            AppError::Io(error).into_response()
        }
    }
}
