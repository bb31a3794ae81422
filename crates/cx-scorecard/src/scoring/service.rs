use super::config::ScoringConfig;
use super::domain::{
    JourneyReview, Phase, ReviewChannel, Service, ServiceId, ServiceKind, ServiceReview,
};
use super::weighted::{round2, total_samples, weighted_average, Sample};
use serde::Serialize;
use tracing::debug;

/// Direction in which journey blending moved a service's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyInfluence {
    Improves,
    Drags,
    Neutral,
}

impl JourneyInfluence {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Improves
        } else if delta < 0.0 {
            Self::Drags
        } else {
            Self::Neutral
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Improves => "Journey lifts score",
            Self::Drags => "Journey drags score",
            Self::Neutral => "No journey effect",
        }
    }
}

/// Rounded standalone and journey-blended scores for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceScore {
    pub service_id: ServiceId,
    pub name: String,
    pub kind: ServiceKind,
    pub kind_label: &'static str,
    pub standalone: f64,
    pub overall: f64,
    /// Present only when the service belongs to at least one journey.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_score: Option<f64>,
    /// `overall - standalone`; positive when the journey lifts the service.
    pub journey_influence: f64,
    pub influence: JourneyInfluence,
    pub influence_label: &'static str,
    pub review_volume: u64,
}

/// Score of a service from its own reviews, ignoring journeys.
pub fn service_standalone_score(
    service: &Service,
    reviews: &[ServiceReview],
    config: &ScoringConfig,
) -> f64 {
    let own: Vec<&ServiceReview> = reviews_for(&service.id, reviews).collect();
    if own.is_empty() {
        return 0.0;
    }

    let score = match service.kind {
        ServiceKind::Simple => simple_score(&own, config),
        ServiceKind::Multiphase => multiphase_score(&own, config),
    };

    round2(score)
}

/// Standalone score blended with the service's journey reviews.
pub fn service_overall_score(
    service: &Service,
    reviews: &[ServiceReview],
    journey_reviews: &[JourneyReview],
    config: &ScoringConfig,
) -> ServiceScore {
    let standalone = service_standalone_score(service, reviews, config);
    let review_volume = total_samples(reviews_for(&service.id, reviews).map(sample_of));

    let (overall, journey_score) = if service.participates_in_journeys() {
        let journey_score = weighted_average(
            journey_reviews
                .iter()
                .filter(|review| service.journeys.contains(&review.journey_id))
                .map(|review| Sample::new(review.score, review.sample_size)),
        );
        let blend = &config.journey_blend_weights;
        let overall = round2(blend.standalone * standalone + blend.journey * journey_score);
        (overall, Some(round2(journey_score)))
    } else {
        (standalone, None)
    };

    let journey_influence = round2(overall - standalone);
    let influence = JourneyInfluence::from_delta(journey_influence);

    ServiceScore {
        service_id: service.id.clone(),
        name: service.name.clone(),
        kind: service.kind,
        kind_label: service.kind.label(),
        standalone,
        overall,
        journey_score,
        journey_influence,
        influence,
        influence_label: influence.label(),
        review_volume,
    }
}

/// Overall score for every service, in input order.
pub fn service_scores(
    services: &[Service],
    reviews: &[ServiceReview],
    journey_reviews: &[JourneyReview],
    config: &ScoringConfig,
) -> Vec<ServiceScore> {
    services
        .iter()
        .map(|service| service_overall_score(service, reviews, journey_reviews, config))
        .collect()
}

/// Volume-weighted mean of overall scores across services that have reviews.
pub fn entity_service_score(
    services: &[Service],
    reviews: &[ServiceReview],
    journey_reviews: &[JourneyReview],
    config: &ScoringConfig,
) -> f64 {
    entity_service_score_from(&service_scores(services, reviews, journey_reviews, config))
}

pub(crate) fn entity_service_score_from(scores: &[ServiceScore]) -> f64 {
    let rated: Vec<Sample> = scores
        .iter()
        .filter(|score| score.review_volume > 0)
        .map(|score| Sample::new(score.overall, score.review_volume))
        .collect();

    debug!(
        services = scores.len(),
        rated = rated.len(),
        "entity service score aggregated"
    );

    round2(weighted_average(rated))
}

fn reviews_for<'a>(
    service_id: &'a ServiceId,
    reviews: &'a [ServiceReview],
) -> impl Iterator<Item = &'a ServiceReview> + 'a {
    reviews
        .iter()
        .filter(move |review| &review.service_id == service_id)
}

fn sample_of(review: &ServiceReview) -> Sample {
    Sample::new(review.score, review.sample_size)
}

// An absent review channel contributes zero; its weight is not handed to the
// channels that do have reviews.
fn simple_score(reviews: &[&ServiceReview], config: &ScoringConfig) -> f64 {
    let weights = &config.channel_of_review_weights;
    ReviewChannel::ordered()
        .into_iter()
        .map(|channel| {
            let average = weighted_average(
                reviews
                    .iter()
                    .filter(|review| review.channel == channel)
                    .map(|review| sample_of(review)),
            );
            weights.get(channel) * average
        })
        .sum()
}

fn multiphase_score(reviews: &[&ServiceReview], config: &ScoringConfig) -> f64 {
    let weights = &config.phase_weights;
    [Phase::Process, Phase::Deliverable]
        .into_iter()
        .map(|phase| {
            let average = weighted_average(
                reviews
                    .iter()
                    .filter(|review| review.phase == Some(phase))
                    .map(|review| sample_of(review)),
            );
            weights.get(phase) * average
        })
        .sum()
}
