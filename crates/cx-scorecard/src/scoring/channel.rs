use super::config::ScoringConfig;
use super::domain::{Booth, Channel, ChannelId, ChannelRating, ChannelType};
use super::weighted::{round2, total_samples, weighted_average, Sample};
use serde::Serialize;
use tracing::debug;

/// Rounded channel-side scores. A category with no rated channel reports 0
/// and is listed in `missing_categories`; its weight went to the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelScores {
    pub app: f64,
    pub web: f64,
    pub service_center: f64,
    pub overall: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_categories: Vec<ChannelType>,
    pub channels: Vec<ChannelScoreEntry>,
}

impl ChannelScores {
    pub fn category(&self, channel_type: ChannelType) -> Option<f64> {
        if self.missing_categories.contains(&channel_type) {
            return None;
        }
        match channel_type {
            ChannelType::App => Some(self.app),
            ChannelType::Web => Some(self.web),
            ChannelType::ServiceCenter => Some(self.service_center),
            ChannelType::SharedPlatform => None,
        }
    }
}

/// Score of one channel that had data, for the dashboard's channel table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelScoreEntry {
    pub channel_id: ChannelId,
    pub channel_type: ChannelType,
    pub channel_type_label: &'static str,
    pub score: f64,
    pub sample_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated_booths: Option<usize>,
}

struct ChannelSample {
    channel: Channel,
    sample: Sample,
    rated_booths: Option<usize>,
}

/// Rolls booth and channel ratings into category scores and the
/// redistributed overall channel score.
pub fn channel_scores(
    channels: &[Channel],
    ratings: &[ChannelRating],
    booths: &[Booth],
    config: &ScoringConfig,
) -> ChannelScores {
    let scored: Vec<ChannelSample> = channels
        .iter()
        .filter_map(|channel| match channel.channel_type {
            ChannelType::App | ChannelType::Web => direct_channel_sample(channel, ratings),
            ChannelType::ServiceCenter => service_center_sample(channel, ratings, booths),
            ChannelType::SharedPlatform => None,
        })
        .collect();

    let weights = &config.channel_type_weights;
    let mut category_scores = Vec::new();
    let mut missing_categories = Vec::new();
    for channel_type in ChannelType::scored() {
        match category_mean(&scored, channel_type) {
            Some(score) => category_scores.push((channel_type, score)),
            None => missing_categories.push(channel_type),
        }
    }

    let present_weight: f64 = category_scores
        .iter()
        .map(|(channel_type, _)| weights.get(*channel_type))
        .sum();
    let present_weight = if present_weight == 0.0 {
        1.0
    } else {
        present_weight
    };
    let overall: f64 = category_scores
        .iter()
        .map(|(channel_type, score)| score * weights.get(*channel_type) / present_weight)
        .sum();

    debug!(
        rated_channels = scored.len(),
        missing = missing_categories.len(),
        "channel scores aggregated"
    );

    let score_for = |channel_type: ChannelType| {
        category_scores
            .iter()
            .find(|(candidate, _)| *candidate == channel_type)
            .map(|(_, score)| round2(*score))
            .unwrap_or(0.0)
    };

    ChannelScores {
        app: score_for(ChannelType::App),
        web: score_for(ChannelType::Web),
        service_center: score_for(ChannelType::ServiceCenter),
        overall: round2(overall),
        missing_categories,
        channels: scored
            .into_iter()
            .map(|entry| ChannelScoreEntry {
                channel_id: entry.channel.id,
                channel_type: entry.channel.channel_type,
                channel_type_label: entry.channel.channel_type.label(),
                score: round2(entry.sample.score),
                sample_size: entry.sample.sample_size,
                rated_booths: entry.rated_booths,
            })
            .collect(),
    }
}

/// Rounded overall channel score only; the half the entity blend needs.
pub fn entity_channel_score(
    channels: &[Channel],
    ratings: &[ChannelRating],
    booths: &[Booth],
    config: &ScoringConfig,
) -> f64 {
    channel_scores(channels, ratings, booths, config).overall
}

fn direct_channel_sample(channel: &Channel, ratings: &[ChannelRating]) -> Option<ChannelSample> {
    let samples: Vec<Sample> = ratings
        .iter()
        .filter(|rating| rating.rates_channel(&channel.id))
        .map(|rating| Sample::new(rating.score, rating.sample_size))
        .collect();

    if samples.is_empty() {
        return None;
    }

    Some(ChannelSample {
        channel: channel.clone(),
        sample: Sample {
            score: weighted_average(samples.iter().copied()),
            sample_size: total_samples(samples),
        },
        rated_booths: None,
    })
}

fn service_center_sample(
    center: &Channel,
    ratings: &[ChannelRating],
    booths: &[Booth],
) -> Option<ChannelSample> {
    let booth_samples: Vec<Sample> = booths
        .iter()
        .filter(|booth| booth.center_id == center.id)
        .filter_map(|booth| {
            let samples: Vec<Sample> = ratings
                .iter()
                .filter(|rating| rating.rates_booth(&booth.id))
                .map(|rating| Sample::new(rating.score, rating.sample_size))
                .collect();
            if samples.is_empty() {
                None
            } else {
                Some(Sample {
                    score: weighted_average(samples.iter().copied()),
                    sample_size: total_samples(samples),
                })
            }
        })
        .collect();

    if booth_samples.is_empty() {
        return None;
    }

    Some(ChannelSample {
        channel: center.clone(),
        sample: Sample {
            score: weighted_average(booth_samples.iter().copied()),
            sample_size: total_samples(booth_samples.iter().copied()),
        },
        rated_booths: Some(booth_samples.len()),
    })
}

/// Plain mean of per-channel scores, not volume weighted.
fn category_mean(scored: &[ChannelSample], channel_type: ChannelType) -> Option<f64> {
    let scores: Vec<f64> = scored
        .iter()
        .filter(|entry| entry.channel.channel_type == channel_type)
        .map(|entry| entry.sample.score)
        .collect();

    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
