//! In-memory record collections and the CSV importer that fills them.
//!
//! This is the data-layer side of the scorecard: it reads exports, scopes
//! them to one entity, and hands borrowed slices to [`crate::scoring`].

mod normalizer;
mod parser;

pub use parser::parse_month;

use crate::scoring::domain::{
    Booth, BoothId, Channel, ChannelId, ChannelRating, Entity, EntityId, Journey, JourneyReview,
    RatingSubject, Service, ServiceId, ServiceReview,
};
use crate::scoring::ScoringInput;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum DatasetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        file: &'static str,
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for DatasetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetImportError::Io(err) => write!(f, "failed to read dataset export: {}", err),
            DatasetImportError::Csv(err) => write!(f, "invalid dataset CSV data: {}", err),
            DatasetImportError::InvalidField {
                file,
                line,
                field,
                value,
            } => write!(
                f,
                "{}:{}: unrecognized {} value '{}'",
                file, line, field, value
            ),
        }
    }
}

impl std::error::Error for DatasetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetImportError::Io(err) => Some(err),
            DatasetImportError::Csv(err) => Some(err),
            DatasetImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for DatasetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Every record collection the scorecard reads, as produced by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardDataset {
    pub entities: Vec<Entity>,
    pub services: Vec<Service>,
    pub channels: Vec<Channel>,
    pub booths: Vec<Booth>,
    pub service_reviews: Vec<ServiceReview>,
    pub channel_ratings: Vec<ChannelRating>,
    pub journeys: Vec<Journey>,
    pub journey_reviews: Vec<JourneyReview>,
}

impl ScorecardDataset {
    pub fn input(&self) -> ScoringInput<'_> {
        ScoringInput {
            services: &self.services,
            channels: &self.channels,
            booths: &self.booths,
            service_reviews: &self.service_reviews,
            channel_ratings: &self.channel_ratings,
            journeys: &self.journeys,
            journey_reviews: &self.journey_reviews,
        }
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| &entity.id == id)
    }

    /// Copy restricted to one entity's services, channels, booths and their
    /// ratings. Journeys span entities and are kept whole.
    pub fn scoped_to(&self, entity_id: &EntityId) -> ScorecardDataset {
        let services: Vec<Service> = self
            .services
            .iter()
            .filter(|service| &service.entity_id == entity_id)
            .cloned()
            .collect();
        let channels: Vec<Channel> = self
            .channels
            .iter()
            .filter(|channel| &channel.entity_id == entity_id)
            .cloned()
            .collect();

        let channel_ids: HashSet<&ChannelId> = channels.iter().map(|channel| &channel.id).collect();
        let booths: Vec<Booth> = self
            .booths
            .iter()
            .filter(|booth| channel_ids.contains(&booth.center_id))
            .cloned()
            .collect();

        let service_ids: HashSet<&ServiceId> = services.iter().map(|service| &service.id).collect();
        let booth_ids: HashSet<&BoothId> = booths.iter().map(|booth| &booth.id).collect();

        let service_reviews = self
            .service_reviews
            .iter()
            .filter(|review| service_ids.contains(&review.service_id))
            .cloned()
            .collect();
        let channel_ratings = self
            .channel_ratings
            .iter()
            .filter(|rating| match &rating.subject {
                RatingSubject::Channel(id) => channel_ids.contains(id),
                RatingSubject::Booth(id) => booth_ids.contains(id),
            })
            .cloned()
            .collect();

        debug!(
            entity = %entity_id,
            services = services.len(),
            channels = channels.len(),
            "dataset scoped to entity"
        );

        ScorecardDataset {
            entities: self
                .entities
                .iter()
                .filter(|entity| &entity.id == entity_id)
                .cloned()
                .collect(),
            services,
            channels,
            booths,
            service_reviews,
            channel_ratings,
            journeys: self.journeys.clone(),
            journey_reviews: self.journey_reviews.clone(),
        }
    }

    /// Most recent month any service review or channel rating falls in.
    pub fn latest_month(&self) -> Option<NaiveDate> {
        self.service_reviews
            .iter()
            .map(|review| review.month)
            .chain(self.channel_ratings.iter().map(|rating| rating.month))
            .max()
    }
}

pub struct DatasetImporter;

impl DatasetImporter {
    /// Loads every known export from `dir`. Missing files leave their
    /// collection empty.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<ScorecardDataset, DatasetImportError> {
        let dir = dir.as_ref();
        let dataset = ScorecardDataset {
            entities: load(dir, parser::ENTITIES, parser::parse_entities)?,
            services: load(dir, parser::SERVICES, parser::parse_services)?,
            channels: load(dir, parser::CHANNELS, parser::parse_channels)?,
            booths: load(dir, parser::BOOTHS, parser::parse_booths)?,
            service_reviews: load(dir, parser::SERVICE_REVIEWS, parser::parse_service_reviews)?,
            channel_ratings: load(dir, parser::CHANNEL_RATINGS, parser::parse_channel_ratings)?,
            journeys: load(dir, parser::JOURNEYS, parser::parse_journeys)?,
            journey_reviews: load(dir, parser::JOURNEY_REVIEWS, parser::parse_journey_reviews)?,
        };

        debug!(
            dir = %dir.display(),
            entities = dataset.entities.len(),
            service_reviews = dataset.service_reviews.len(),
            channel_ratings = dataset.channel_ratings.len(),
            "dataset imported"
        );

        Ok(dataset)
    }

    pub fn entities_from_reader<R: Read>(reader: R) -> Result<Vec<Entity>, DatasetImportError> {
        parser::parse_entities(reader)
    }

    pub fn services_from_reader<R: Read>(reader: R) -> Result<Vec<Service>, DatasetImportError> {
        parser::parse_services(reader)
    }

    pub fn channels_from_reader<R: Read>(reader: R) -> Result<Vec<Channel>, DatasetImportError> {
        parser::parse_channels(reader)
    }

    pub fn booths_from_reader<R: Read>(reader: R) -> Result<Vec<Booth>, DatasetImportError> {
        parser::parse_booths(reader)
    }

    pub fn service_reviews_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ServiceReview>, DatasetImportError> {
        parser::parse_service_reviews(reader)
    }

    pub fn channel_ratings_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ChannelRating>, DatasetImportError> {
        parser::parse_channel_ratings(reader)
    }

    pub fn journeys_from_reader<R: Read>(reader: R) -> Result<Vec<Journey>, DatasetImportError> {
        parser::parse_journeys(reader)
    }

    pub fn journey_reviews_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<JourneyReview>, DatasetImportError> {
        parser::parse_journey_reviews(reader)
    }
}

fn load<T>(
    dir: &Path,
    file_name: &str,
    parse: fn(File) -> Result<Vec<T>, DatasetImportError>,
) -> Result<Vec<T>, DatasetImportError> {
    match File::open(dir.join(file_name)) {
        Ok(file) => parse(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(file = file_name, "dataset export missing, treating as empty");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}
