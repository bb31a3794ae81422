use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::dashboard::{DashboardService, DatasetSource, InMemorySource, SourceError};
use crate::dataset::ScorecardDataset;
use crate::scoring::domain::{
    Booth, BoothId, Channel, ChannelId, ChannelRating, ChannelType, Entity, EntityId, Journey,
    JourneyId, JourneyReview, RatingSubject, ReviewChannel, Service, ServiceId, ServiceKind,
    ServiceReview,
};
use crate::scoring::{ScorecardEngine, ScoringConfig};

pub(super) fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

fn entity(id: &str, name: &str) -> Entity {
    Entity {
        id: EntityId::new(id),
        name: name.to_string(),
        sector: "Government".to_string(),
        location: "Riyadh".to_string(),
    }
}

fn service(id: &str, entity_id: &str) -> Service {
    Service {
        id: ServiceId::new(id),
        entity_id: EntityId::new(entity_id),
        name: format!("Service {id}"),
        kind: ServiceKind::Simple,
        journeys: Vec::new(),
        owner: "Customer Care".to_string(),
    }
}

fn channel(id: &str, entity_id: &str, channel_type: ChannelType) -> Channel {
    Channel {
        id: ChannelId::new(id),
        entity_id: EntityId::new(entity_id),
        name: format!("Channel {id}"),
        channel_type,
    }
}

fn review(service_id: &str, channel: ReviewChannel, score: f64, sample_size: u32) -> ServiceReview {
    ServiceReview {
        service_id: ServiceId::new(service_id),
        month: month(2024, 1),
        channel,
        phase: None,
        score,
        sample_size,
    }
}

fn rating(subject: RatingSubject, score: f64, sample_size: u32) -> ChannelRating {
    ChannelRating {
        subject,
        month: month(2024, 1),
        score,
        sample_size,
    }
}

fn journey_review(journey_id: &str, bucket: NaiveDate, score: f64, sample_size: u32) -> JourneyReview {
    JourneyReview {
        journey_id: JourneyId::new(journey_id),
        month: bucket,
        score,
        sample_size,
    }
}

/// Two entities; `ent-2` carries loud data that must never leak into `ent-1`.
pub(super) fn dataset() -> ScorecardDataset {
    ScorecardDataset {
        entities: vec![
            entity("ent-2", "Civil Registry"),
            entity("ent-1", "Transport Authority"),
        ],
        services: vec![service("svc-1", "ent-1"), service("svc-9", "ent-2")],
        channels: vec![
            channel("app-1", "ent-1", ChannelType::App),
            channel("center-1", "ent-1", ChannelType::ServiceCenter),
            channel("app-9", "ent-2", ChannelType::App),
        ],
        booths: vec![Booth {
            id: BoothId::new("booth-1"),
            center_id: ChannelId::new("center-1"),
            name: "North booth".to_string(),
        }],
        service_reviews: vec![
            review("svc-1", ReviewChannel::App, 80.0, 100),
            review("svc-1", ReviewChannel::Web, 60.0, 50),
            review("svc-9", ReviewChannel::App, 10.0, 1000),
        ],
        channel_ratings: vec![
            rating(RatingSubject::Channel(ChannelId::new("app-1")), 80.0, 10),
            rating(RatingSubject::Booth(BoothId::new("booth-1")), 60.0, 5),
            rating(RatingSubject::Channel(ChannelId::new("app-9")), 10.0, 100),
        ],
        journeys: vec![
            Journey {
                id: JourneyId::new("j-1"),
                name: "Renew a licence".to_string(),
                steps: vec![ServiceId::new("svc-1")],
            },
            Journey {
                id: JourneyId::new("j-2"),
                name: "Register a birth".to_string(),
                steps: vec![ServiceId::new("svc-9")],
            },
        ],
        journey_reviews: vec![
            journey_review("j-1", month(2024, 2), 70.0, 6),
            journey_review("j-1", month(2024, 1), 50.0, 4),
        ],
    }
}

pub(super) fn build_service(
    config: ScoringConfig,
) -> Arc<DashboardService<InMemorySource>> {
    Arc::new(DashboardService::new(
        Arc::new(InMemorySource::new(dataset())),
        ScorecardEngine::new(config),
    ))
}

pub(super) struct UnavailableSource;

impl DatasetSource for UnavailableSource {
    fn snapshot(&self) -> Result<ScorecardDataset, SourceError> {
        Err(SourceError::Unavailable("export in progress".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
