use chrono::NaiveDate;

use crate::scoring::domain::{
    Booth, BoothId, Channel, ChannelId, ChannelRating, ChannelType, EntityId, Journey, JourneyId,
    JourneyReview, Phase, RatingSubject, ReviewChannel, Service, ServiceId, ServiceKind,
    ServiceReview,
};

pub(super) fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

pub(super) fn jan() -> NaiveDate {
    month(2024, 1)
}

pub(super) fn service(id: &str, kind: ServiceKind, journeys: &[&str]) -> Service {
    Service {
        id: ServiceId::new(id),
        entity_id: EntityId::new("ent-1"),
        name: format!("Service {id}"),
        kind,
        journeys: journeys.iter().map(|journey| JourneyId::new(*journey)).collect(),
        owner: "Customer Care".to_string(),
    }
}

pub(super) fn review(
    service_id: &str,
    channel: ReviewChannel,
    score: f64,
    sample_size: u32,
) -> ServiceReview {
    ServiceReview {
        service_id: ServiceId::new(service_id),
        month: jan(),
        channel,
        phase: None,
        score,
        sample_size,
    }
}

pub(super) fn phase_review(
    service_id: &str,
    phase: Phase,
    score: f64,
    sample_size: u32,
) -> ServiceReview {
    ServiceReview {
        phase: Some(phase),
        ..review(service_id, ReviewChannel::Shared, score, sample_size)
    }
}

pub(super) fn channel(id: &str, channel_type: ChannelType) -> Channel {
    Channel {
        id: ChannelId::new(id),
        entity_id: EntityId::new("ent-1"),
        name: format!("Channel {id}"),
        channel_type,
    }
}

pub(super) fn booth(id: &str, center_id: &str) -> Booth {
    Booth {
        id: BoothId::new(id),
        center_id: ChannelId::new(center_id),
        name: format!("Booth {id}"),
    }
}

pub(super) fn channel_rating(channel_id: &str, score: f64, sample_size: u32) -> ChannelRating {
    ChannelRating {
        subject: RatingSubject::Channel(ChannelId::new(channel_id)),
        month: jan(),
        score,
        sample_size,
    }
}

pub(super) fn booth_rating(booth_id: &str, score: f64, sample_size: u32) -> ChannelRating {
    ChannelRating {
        subject: RatingSubject::Booth(BoothId::new(booth_id)),
        month: jan(),
        score,
        sample_size,
    }
}

pub(super) fn journey(id: &str, steps: &[&str]) -> Journey {
    Journey {
        id: JourneyId::new(id),
        name: format!("Journey {id}"),
        steps: steps.iter().map(|step| ServiceId::new(*step)).collect(),
    }
}

pub(super) fn journey_review(journey_id: &str, score: f64, sample_size: u32) -> JourneyReview {
    JourneyReview {
        journey_id: JourneyId::new(journey_id),
        month: jan(),
        score,
        sample_size,
    }
}
