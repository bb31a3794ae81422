//! Hierarchical satisfaction scoring.
//!
//! Leaf first: [`weighted`] averages samples, [`channel`] and [`service`]
//! score the two sides of an entity independently, [`entity`] blends them,
//! and [`trend`] repeats the whole roll-up per month bucket. Every function
//! is pure and takes its [`ScoringConfig`] explicitly. Scores are rounded to
//! two decimals only where they leave a component.

pub mod channel;
mod config;
pub mod domain;
pub mod entity;
pub mod service;
pub mod trend;
pub mod weighted;

#[cfg(test)]
mod tests;

pub use channel::{channel_scores, entity_channel_score, ChannelScoreEntry, ChannelScores};
pub use config::{
    ChannelTypeWeights, EntityBlendWeights, JourneyBlendWeights, PhaseWeights,
    ReviewChannelWeights, ScoringConfig,
};
pub use entity::{entity_score, entity_scorecard, EntityScorecard};
pub use service::{
    entity_service_score, service_overall_score, service_scores, service_standalone_score,
    JourneyInfluence, ServiceScore,
};
pub use trend::{journey_trends, score_trend, JourneyTrend, JourneyTrendPoint, TrendPoint};

use domain::{
    Booth, Channel, ChannelRating, Journey, JourneyReview, Service, ServiceReview,
};

/// Borrowed view over the record collections one scoring call reads. The
/// caller scopes these to a single entity beforehand.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub services: &'a [Service],
    pub channels: &'a [Channel],
    pub booths: &'a [Booth],
    pub service_reviews: &'a [ServiceReview],
    pub channel_ratings: &'a [ChannelRating],
    pub journeys: &'a [Journey],
    pub journey_reviews: &'a [JourneyReview],
}

impl ScoringInput<'_> {
    pub fn review_volume(&self) -> u64 {
        self.service_reviews
            .iter()
            .map(|review| u64::from(review.sample_size))
            .sum()
    }

    pub fn rating_volume(&self) -> u64 {
        self.channel_ratings
            .iter()
            .map(|rating| u64::from(rating.sample_size))
            .sum()
    }
}

/// Stateless engine applying one weight configuration to scoring inputs.
#[derive(Debug, Clone, Default)]
pub struct ScorecardEngine {
    config: ScoringConfig,
}

impl ScorecardEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn channel_scores(
        &self,
        channels: &[Channel],
        ratings: &[ChannelRating],
        booths: &[Booth],
    ) -> ChannelScores {
        channel_scores(channels, ratings, booths, &self.config)
    }

    pub fn service_standalone_score(&self, service: &Service, reviews: &[ServiceReview]) -> f64 {
        service_standalone_score(service, reviews, &self.config)
    }

    pub fn service_overall_score(
        &self,
        service: &Service,
        reviews: &[ServiceReview],
        journey_reviews: &[JourneyReview],
    ) -> ServiceScore {
        service_overall_score(service, reviews, journey_reviews, &self.config)
    }

    pub fn entity_service_score(
        &self,
        services: &[Service],
        reviews: &[ServiceReview],
        journey_reviews: &[JourneyReview],
    ) -> f64 {
        entity_service_score(services, reviews, journey_reviews, &self.config)
    }

    pub fn entity_score(&self, service_score: f64, channel_score: f64) -> f64 {
        entity_score(service_score, channel_score, &self.config)
    }

    pub fn scorecard(&self, input: &ScoringInput<'_>) -> EntityScorecard {
        entity_scorecard(input, &self.config)
    }

    pub fn trend(&self, input: &ScoringInput<'_>) -> Vec<TrendPoint> {
        score_trend(input, &self.config)
    }

    pub fn journey_trends(&self, input: &ScoringInput<'_>) -> Vec<JourneyTrend> {
        journey_trends(input.journeys, input.journey_reviews)
    }
}
