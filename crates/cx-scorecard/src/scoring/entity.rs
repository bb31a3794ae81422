use super::channel::{channel_scores, ChannelScores};
use super::config::ScoringConfig;
use super::service::{entity_service_score_from, service_scores, ServiceScore};
use super::weighted::round2;
use super::ScoringInput;
use serde::Serialize;

/// Top-line blend of the service-side and channel-side scores.
pub fn entity_score(service_score: f64, channel_score: f64, config: &ScoringConfig) -> f64 {
    let blend = &config.entity_blend_weights;
    round2(blend.service * service_score + blend.channel * channel_score)
}

/// Everything the dashboard's entity page shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityScorecard {
    pub entity_score: f64,
    pub service_score: f64,
    pub channel_score: f64,
    pub channels: ChannelScores,
    pub services: Vec<ServiceScore>,
    pub review_volume: u64,
    pub rating_volume: u64,
}

pub fn entity_scorecard(input: &ScoringInput<'_>, config: &ScoringConfig) -> EntityScorecard {
    let services = service_scores(
        input.services,
        input.service_reviews,
        input.journey_reviews,
        config,
    );
    let channels = channel_scores(input.channels, input.channel_ratings, input.booths, config);

    let service_score = entity_service_score_from(&services);
    let channel_score = channels.overall;

    EntityScorecard {
        entity_score: entity_score(service_score, channel_score, config),
        service_score,
        channel_score,
        review_volume: input.review_volume(),
        rating_volume: input.rating_volume(),
        channels,
        services,
    }
}
