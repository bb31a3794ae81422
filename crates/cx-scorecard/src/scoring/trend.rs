use super::channel::entity_channel_score;
use super::config::ScoringConfig;
use super::domain::{Journey, JourneyId, JourneyReview};
use super::entity::entity_score;
use super::service::entity_service_score;
use super::ScoringInput;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub entity_score: f64,
    pub service_score: f64,
    pub channel_score: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyTrendPoint {
    pub date: NaiveDate,
    pub score: f64,
    pub sample_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyTrend {
    pub journey_id: JourneyId,
    pub journey_name: String,
    pub points: Vec<JourneyTrendPoint>,
}

/// Re-scores the entity once per configured bucket, using only the records
/// stamped with that month. Points come back in bucket order.
pub fn score_trend(input: &ScoringInput<'_>, config: &ScoringConfig) -> Vec<TrendPoint> {
    config
        .trend_buckets
        .iter()
        .map(|&bucket| {
            let service_reviews: Vec<_> = input
                .service_reviews
                .iter()
                .filter(|review| review.month == bucket)
                .cloned()
                .collect();
            let channel_ratings: Vec<_> = input
                .channel_ratings
                .iter()
                .filter(|rating| rating.month == bucket)
                .cloned()
                .collect();
            let journey_reviews: Vec<_> = input
                .journey_reviews
                .iter()
                .filter(|review| review.month == bucket)
                .cloned()
                .collect();

            let bucket_input = ScoringInput {
                service_reviews: &service_reviews,
                channel_ratings: &channel_ratings,
                journey_reviews: &journey_reviews,
                ..*input
            };

            let service_score = entity_service_score(
                bucket_input.services,
                bucket_input.service_reviews,
                bucket_input.journey_reviews,
                config,
            );
            let channel_score = entity_channel_score(
                bucket_input.channels,
                bucket_input.channel_ratings,
                bucket_input.booths,
                config,
            );
            let volume = bucket_input.review_volume() + bucket_input.rating_volume();

            debug!(%bucket, volume, "trend bucket scored");

            TrendPoint {
                date: bucket,
                entity_score: entity_score(service_score, channel_score, config),
                service_score,
                channel_score,
                volume,
            }
        })
        .collect()
}

/// Chronological review series for each known journey, across all months.
/// Reviews pointing at journeys missing from `journeys` are dropped.
pub fn journey_trends(journeys: &[Journey], journey_reviews: &[JourneyReview]) -> Vec<JourneyTrend> {
    journeys
        .iter()
        .map(|journey| {
            let mut points: Vec<JourneyTrendPoint> = journey_reviews
                .iter()
                .filter(|review| review.journey_id == journey.id)
                .map(|review| JourneyTrendPoint {
                    date: review.month,
                    score: review.score,
                    sample_size: review.sample_size,
                })
                .collect();
            points.sort_by_key(|point| point.date);

            JourneyTrend {
                journey_id: journey.id.clone(),
                journey_name: journey.name.clone(),
                points,
            }
        })
        .collect()
}

/// First day of the month `date` falls in.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// `count` consecutive month buckets, oldest first, ending with `end`'s month.
pub fn trailing_months(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let last = month_start(end);
    (0..count)
        .rev()
        .filter_map(|offset| {
            let offset = u32::try_from(offset).ok()?;
            last.checked_sub_months(Months::new(offset))
        })
        .collect()
}
