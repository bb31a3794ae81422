use super::domain::{ChannelType, Phase, ReviewChannel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weights and bucket sequence every aggregator reads. Omitted groups in a
/// JSON override fall back to the dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub channel_type_weights: ChannelTypeWeights,
    pub channel_of_review_weights: ReviewChannelWeights,
    pub phase_weights: PhaseWeights,
    pub journey_blend_weights: JourneyBlendWeights,
    pub entity_blend_weights: EntityBlendWeights,
    /// Month-start dates, in the order trend points are emitted.
    pub trend_buckets: Vec<NaiveDate>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            channel_type_weights: ChannelTypeWeights::default(),
            channel_of_review_weights: ReviewChannelWeights::default(),
            phase_weights: PhaseWeights::default(),
            journey_blend_weights: JourneyBlendWeights::default(),
            entity_blend_weights: EntityBlendWeights::default(),
            trend_buckets: Vec::new(),
        }
    }
}

impl ScoringConfig {
    pub fn with_trend_buckets(mut self, buckets: Vec<NaiveDate>) -> Self {
        self.trend_buckets = buckets;
        self
    }

    /// Every weight paired with its option path, for validation and display.
    pub fn named_weights(&self) -> [(&'static str, f64); 12] {
        let channel = &self.channel_type_weights;
        let review = &self.channel_of_review_weights;
        [
            ("channelTypeWeights.app", channel.app),
            ("channelTypeWeights.web", channel.web),
            ("channelTypeWeights.service_center", channel.service_center),
            ("channelOfReviewWeights.app", review.app),
            ("channelOfReviewWeights.web", review.web),
            ("channelOfReviewWeights.shared", review.shared),
            ("phaseWeights.process", self.phase_weights.process),
            ("phaseWeights.deliverable", self.phase_weights.deliverable),
            (
                "journeyBlendWeights.standalone",
                self.journey_blend_weights.standalone,
            ),
            ("journeyBlendWeights.journey", self.journey_blend_weights.journey),
            ("entityBlendWeights.service", self.entity_blend_weights.service),
            ("entityBlendWeights.channel", self.entity_blend_weights.channel),
        ]
    }

    /// Returns the first weight that is negative or not finite.
    pub fn invalid_weight(&self) -> Option<(&'static str, f64)> {
        self.named_weights()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelTypeWeights {
    pub app: f64,
    pub web: f64,
    pub service_center: f64,
}

impl Default for ChannelTypeWeights {
    fn default() -> Self {
        Self {
            app: 0.5,
            web: 0.2,
            service_center: 0.3,
        }
    }
}

impl ChannelTypeWeights {
    /// Shared platforms never form a category, so they carry no weight.
    pub fn get(&self, channel_type: ChannelType) -> f64 {
        match channel_type {
            ChannelType::App => self.app,
            ChannelType::Web => self.web,
            ChannelType::ServiceCenter => self.service_center,
            ChannelType::SharedPlatform => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewChannelWeights {
    pub app: f64,
    pub web: f64,
    pub shared: f64,
}

impl Default for ReviewChannelWeights {
    fn default() -> Self {
        Self {
            app: 0.38,
            web: 0.26,
            shared: 0.36,
        }
    }
}

impl ReviewChannelWeights {
    pub fn get(&self, channel: ReviewChannel) -> f64 {
        match channel {
            ReviewChannel::App => self.app,
            ReviewChannel::Web => self.web,
            ReviewChannel::Shared => self.shared,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseWeights {
    pub process: f64,
    pub deliverable: f64,
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self {
            process: 0.8,
            deliverable: 0.2,
        }
    }
}

impl PhaseWeights {
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Process => self.process,
            Phase::Deliverable => self.deliverable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyBlendWeights {
    pub standalone: f64,
    pub journey: f64,
}

impl Default for JourneyBlendWeights {
    fn default() -> Self {
        Self {
            standalone: 0.7,
            journey: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityBlendWeights {
    pub service: f64,
    pub channel: f64,
}

impl Default for EntityBlendWeights {
    fn default() -> Self {
        Self {
            service: 0.7,
            channel: 0.3,
        }
    }
}
