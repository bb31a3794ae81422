use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use cx_scorecard::dashboard::{DashboardError, DashboardService, DirectorySource};
use cx_scorecard::scoring::domain::{ChannelType, EntityId};
use cx_scorecard::scoring::{JourneyInfluence, ScorecardEngine, ScoringConfig};

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

fn service(config: ScoringConfig) -> DashboardService<DirectorySource> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample");
    DashboardService::new(
        Arc::new(DirectorySource::new(dir)),
        ScorecardEngine::new(config),
    )
}

#[test]
fn transport_scorecard_rolls_up_all_levels() {
    let view = service(ScoringConfig::default())
        .scorecard(&EntityId::new("ent-transport"))
        .expect("scorecard computed");
    let scorecard = view.scorecard;

    assert_eq!(scorecard.channels.app, 79.41);
    assert_eq!(scorecard.channels.web, 64.63);
    assert_eq!(scorecard.channels.service_center, 67.1);
    assert!(scorecard.channels.missing_categories.is_empty());
    assert_eq!(scorecard.channel_score, 72.76);

    let licence = &scorecard.services[0];
    assert_eq!(licence.standalone, 73.69);
    assert_eq!(licence.journey_score, Some(66.21));
    assert_eq!(licence.overall, 71.45);
    assert_eq!(licence.journey_influence, -2.24);
    assert_eq!(licence.influence, JourneyInfluence::Drags);
    assert_eq!(licence.review_volume, 585);

    let permit = &scorecard.services[1];
    assert_eq!(permit.standalone, 65.86);
    assert_eq!(permit.overall, 65.86);
    assert_eq!(permit.journey_score, None);
    assert_eq!(permit.review_volume, 100);

    assert_eq!(scorecard.service_score, 70.63);
    assert_eq!(scorecard.entity_score, 71.27);
    assert_eq!(scorecard.review_volume, 685);
    assert_eq!(scorecard.rating_volume, 1405);
}

#[test]
fn registry_redistributes_the_missing_web_weight() {
    let view = service(ScoringConfig::default())
        .scorecard(&EntityId::new("ent-registry"))
        .expect("scorecard computed");
    let scorecard = view.scorecard;

    assert_eq!(scorecard.channels.missing_categories, vec![ChannelType::Web]);
    assert_eq!(scorecard.channels.web, 0.0);
    assert_eq!(scorecard.channel_score, 76.5);
    assert_eq!(scorecard.service_score, 61.74);
    assert_eq!(scorecard.entity_score, 66.17);

    let influences: Vec<_> = scorecard
        .services
        .iter()
        .map(|service| (service.overall, service.journey_influence))
        .collect();
    assert_eq!(influences, vec![(61.23, 9.33), (62.53, 2.73)]);
}

#[test]
fn monthly_trend_rescores_each_bucket() {
    let config = ScoringConfig::default().with_trend_buckets(vec![
        month(2024, 1),
        month(2024, 2),
        month(2024, 3),
        month(2024, 4),
    ]);

    let view = service(config)
        .trend(&EntityId::new("ent-transport"))
        .expect("trend computed");
    let points = view.points;

    assert_eq!(points.len(), 4);
    assert_eq!(
        (points[0].entity_score, points[0].service_score, points[0].channel_score),
        (68.06, 67.21, 70.05)
    );
    assert_eq!(points[0].volume, 610);
    assert_eq!(points[1].service_score, 53.4);
    assert_eq!(points[1].channel_score, 76.75);
    assert_eq!(points[1].volume, 940);
    assert_eq!(
        (points[2].entity_score, points[2].service_score, points[2].channel_score),
        (62.14, 56.93, 74.3)
    );
    assert_eq!(points[2].volume, 540);
    assert_eq!(points[3].entity_score, 0.0);
    assert_eq!(points[3].volume, 0);
}

#[test]
fn journey_series_cover_every_known_journey() {
    let series = service(ScoringConfig::default())
        .journey_trends()
        .expect("journey trends computed");

    let names: Vec<_> = series
        .iter()
        .map(|journey| journey.journey_name.as_str())
        .collect();
    assert_eq!(names, vec!["Moving to a new city", "New baby", "Retirement"]);

    let moving: Vec<_> = series[0]
        .points
        .iter()
        .map(|point| (point.date, point.score))
        .collect();
    assert_eq!(
        moving,
        vec![
            (month(2024, 1), 60.0),
            (month(2024, 2), 66.0),
            (month(2024, 3), 71.0),
        ]
    );
    assert_eq!(series[1].points.len(), 1);
    assert!(series[2].points.is_empty());
}

#[test]
fn unknown_entity_is_rejected() {
    let error = service(ScoringConfig::default())
        .scorecard(&EntityId::new("ent-missing"))
        .expect_err("entity is unknown");

    assert!(matches!(error, DashboardError::UnknownEntity(_)));
}
