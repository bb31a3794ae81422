use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::dashboard::{dashboard_router, DashboardService, DirectorySource};
use crate::scoring::{ScorecardEngine, ScoringConfig};

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn entities_route_lists_entities() {
    let router = dashboard_router(build_service(ScoringConfig::default()));

    let response = router.oneshot(get("/api/v1/entities")).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["id"], json!("ent-1"));
    assert_eq!(body[1]["name"], json!("Civil Registry"));
}

#[tokio::test]
async fn scorecard_route_returns_flattened_scores() {
    let router = dashboard_router(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(get("/api/v1/entities/ent-1/scorecard"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["entity"]["id"], json!("ent-1"));
    assert_eq!(body["entity_score"], json!(53.95));
    assert_eq!(body["service_score"], json!(46.0));
    assert_eq!(body["channel_score"], json!(72.5));
    assert_eq!(body["services"][0]["service_id"], json!("svc-1"));
    assert_eq!(body["channels"]["missing_categories"], json!(["web"]));
}

#[tokio::test]
async fn scorecard_route_returns_not_found_for_unknown_entity() {
    let router = dashboard_router(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(get("/api/v1/entities/ent-404/scorecard"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], json!("unknown entity: ent-404"));
}

#[tokio::test]
async fn trend_route_serializes_bucket_dates() {
    let config = ScoringConfig::default().with_trend_buckets(vec![month(2024, 1)]);
    let router = dashboard_router(build_service(config));

    let response = router
        .oneshot(get("/api/v1/entities/ent-1/trend"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["points"][0]["date"], json!("2024-01-01"));
    assert_eq!(body["points"][0]["entity_score"], json!(53.95));
}

#[tokio::test]
async fn journey_trend_route_sorts_points_by_month() {
    let router = dashboard_router(build_service(ScoringConfig::default()));

    let response = router
        .oneshot(get("/api/v1/journeys/trend"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["journey_id"], json!("j-1"));
    assert_eq!(body[0]["points"][0]["date"], json!("2024-01-01"));
    assert_eq!(body[0]["points"][1]["score"], json!(70.0));
    assert_eq!(body[1]["points"], json!([]));
}

#[tokio::test]
async fn unavailable_source_maps_to_service_unavailable() {
    let service = Arc::new(DashboardService::new(
        Arc::new(UnavailableSource),
        ScorecardEngine::default(),
    ));
    let router = dashboard_router(service);

    let response = router.oneshot(get("/api/v1/entities")).await.expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn directory_source_serves_exports_from_disk() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample");
    let service = Arc::new(DashboardService::new(
        Arc::new(DirectorySource::new(dir)),
        ScorecardEngine::default(),
    ));
    let router = dashboard_router(service);

    let response = router
        .oneshot(get("/api/v1/entities/ent-transport/scorecard"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["entity_score"], json!(71.27));
    assert_eq!(body["review_volume"], json!(685));
}

#[tokio::test]
async fn missing_export_directory_maps_to_service_unavailable() {
    let service = Arc::new(DashboardService::new(
        Arc::new(DirectorySource::new("/nonexistent/cx-scorecard-exports")),
        ScorecardEngine::default(),
    ));
    let router = dashboard_router(service);

    let response = router
        .oneshot(get("/api/v1/journeys/trend"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
