use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(EntityId);
string_id!(ServiceId);
string_id!(ChannelId);
string_id!(BoothId);
string_id!(JourneyId);

/// Organization whose experience is being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub sector: String,
    pub location: String,
}

/// Decides which standalone rule applies to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Simple,
    Multiphase,
}

impl ServiceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Multiphase => "Multi-phase",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub entity_id: EntityId,
    pub name: String,
    pub kind: ServiceKind,
    #[serde(default)]
    pub journeys: Vec<JourneyId>,
    pub owner: String,
}

impl Service {
    pub fn participates_in_journeys(&self) -> bool {
        !self.journeys.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    App,
    Web,
    ServiceCenter,
    SharedPlatform,
}

impl ChannelType {
    /// Channel types that contribute a category to the channel score.
    pub const fn scored() -> [Self; 3] {
        [Self::App, Self::Web, Self::ServiceCenter]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::App => "Mobile App",
            Self::Web => "Web Portal",
            Self::ServiceCenter => "Service Center",
            Self::SharedPlatform => "Shared Platform",
        }
    }
}

/// Delivery touchpoint. Service centers are only rated through their booths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub entity_id: EntityId,
    pub name: String,
    pub channel_type: ChannelType,
}

/// Physical counter inside a service center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booth {
    pub id: BoothId,
    pub center_id: ChannelId,
    pub name: String,
}

/// Channel through which a service review was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewChannel {
    App,
    Web,
    Shared,
}

impl ReviewChannel {
    pub const fn ordered() -> [Self; 3] {
        [Self::App, Self::Web, Self::Shared]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::App => "App",
            Self::Web => "Web",
            Self::Shared => "Shared",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Process,
    Deliverable,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::Deliverable => "Deliverable",
        }
    }
}

/// Aggregated rating event for a service. `month` is the first day of the
/// bucket the underlying ratings fall in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceReview {
    pub service_id: ServiceId,
    pub month: NaiveDate,
    pub channel: ReviewChannel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    pub score: f64,
    pub sample_size: u32,
}

/// What a channel rating is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSubject {
    Channel(ChannelId),
    Booth(BoothId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRating {
    pub subject: RatingSubject,
    pub month: NaiveDate,
    pub score: f64,
    pub sample_size: u32,
}

impl ChannelRating {
    pub fn rates_channel(&self, channel_id: &ChannelId) -> bool {
        matches!(&self.subject, RatingSubject::Channel(id) if id == channel_id)
    }

    pub fn rates_booth(&self, booth_id: &BoothId) -> bool {
        matches!(&self.subject, RatingSubject::Booth(id) if id == booth_id)
    }
}

/// Cross-entity customer journey (DCX) made of ordered service steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: JourneyId,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyReview {
    pub journey_id: JourneyId,
    pub month: NaiveDate,
    pub score: f64,
    pub sample_size: u32,
}
