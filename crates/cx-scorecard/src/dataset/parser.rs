use super::normalizer::{self, split_list};
use super::DatasetImportError;
use crate::scoring::domain::{
    Booth, BoothId, Channel, ChannelId, ChannelRating, Entity, EntityId, Journey, JourneyId,
    JourneyReview, RatingSubject, Service, ServiceId, ServiceReview,
};
use crate::scoring::trend::month_start;
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const ENTITIES: &str = "entities.csv";
pub(crate) const SERVICES: &str = "services.csv";
pub(crate) const CHANNELS: &str = "channels.csv";
pub(crate) const BOOTHS: &str = "booths.csv";
pub(crate) const SERVICE_REVIEWS: &str = "service_reviews.csv";
pub(crate) const CHANNEL_RATINGS: &str = "channel_ratings.csv";
pub(crate) const JOURNEYS: &str = "journeys.csv";
pub(crate) const JOURNEY_REVIEWS: &str = "journey_reviews.csv";

/// Deserializes every row, pairing it with its 1-based line in the file.
fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<(usize, T)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<T>().enumerate() {
        rows.push((index + 2, record?));
    }

    Ok(rows)
}

fn invalid(file: &'static str, line: usize, field: &'static str, value: &str) -> DatasetImportError {
    DatasetImportError::InvalidField {
        file,
        line,
        field,
        value: value.to_string(),
    }
}

fn month_field(
    file: &'static str,
    line: usize,
    value: &str,
) -> Result<NaiveDate, DatasetImportError> {
    parse_month(value).ok_or_else(|| invalid(file, line, "timestamp", value))
}

#[derive(Debug, Deserialize)]
struct EntityRow {
    id: String,
    name: String,
    #[serde(default)]
    sector: String,
    #[serde(default)]
    location: String,
}

pub(crate) fn parse_entities<R: Read>(reader: R) -> Result<Vec<Entity>, DatasetImportError> {
    Ok(read_rows::<_, EntityRow>(reader)?
        .into_iter()
        .map(|(_, row)| Entity {
            id: EntityId(row.id),
            name: row.name,
            sector: row.sector,
            location: row.location,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct ServiceRow {
    id: String,
    entity_id: String,
    name: String,
    kind: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    journeys: Option<String>,
    #[serde(default)]
    owner: String,
}

pub(crate) fn parse_services<R: Read>(reader: R) -> Result<Vec<Service>, DatasetImportError> {
    read_rows::<_, ServiceRow>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let kind = normalizer::service_kind(&row.kind)
                .ok_or_else(|| invalid(SERVICES, line, "kind", &row.kind))?;
            let journeys = row
                .journeys
                .as_deref()
                .map(split_list)
                .unwrap_or_default()
                .into_iter()
                .map(JourneyId)
                .collect();

            Ok(Service {
                id: ServiceId(row.id),
                entity_id: EntityId(row.entity_id),
                name: row.name,
                kind,
                journeys,
                owner: row.owner,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ChannelRow {
    id: String,
    entity_id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    channel_type: String,
}

pub(crate) fn parse_channels<R: Read>(reader: R) -> Result<Vec<Channel>, DatasetImportError> {
    read_rows::<_, ChannelRow>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let channel_type = normalizer::channel_type(&row.channel_type)
                .ok_or_else(|| invalid(CHANNELS, line, "type", &row.channel_type))?;
            Ok(Channel {
                id: ChannelId(row.id),
                entity_id: EntityId(row.entity_id),
                name: row.name,
                channel_type,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct BoothRow {
    id: String,
    center_id: String,
    #[serde(default)]
    name: String,
}

pub(crate) fn parse_booths<R: Read>(reader: R) -> Result<Vec<Booth>, DatasetImportError> {
    Ok(read_rows::<_, BoothRow>(reader)?
        .into_iter()
        .map(|(_, row)| Booth {
            id: BoothId(row.id),
            center_id: ChannelId(row.center_id),
            name: row.name,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct ServiceReviewRow {
    service_id: String,
    timestamp: String,
    channel: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phase: Option<String>,
    score: f64,
    sample_size: u32,
}

pub(crate) fn parse_service_reviews<R: Read>(
    reader: R,
) -> Result<Vec<ServiceReview>, DatasetImportError> {
    read_rows::<_, ServiceReviewRow>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let month = month_field(SERVICE_REVIEWS, line, &row.timestamp)?;
            let channel = normalizer::review_channel(&row.channel)
                .ok_or_else(|| invalid(SERVICE_REVIEWS, line, "channel", &row.channel))?;
            let phase = match row.phase.as_deref() {
                Some(raw) => Some(
                    normalizer::phase(raw)
                        .ok_or_else(|| invalid(SERVICE_REVIEWS, line, "phase", raw))?,
                ),
                None => None,
            };

            Ok(ServiceReview {
                service_id: ServiceId(row.service_id),
                month,
                channel,
                phase,
                score: row.score,
                sample_size: row.sample_size,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ChannelRatingRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    channel_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    booth_id: Option<String>,
    timestamp: String,
    score: f64,
    sample_size: u32,
}

pub(crate) fn parse_channel_ratings<R: Read>(
    reader: R,
) -> Result<Vec<ChannelRating>, DatasetImportError> {
    read_rows::<_, ChannelRatingRow>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let subject = match (row.channel_id, row.booth_id) {
                (Some(channel_id), None) => RatingSubject::Channel(ChannelId(channel_id)),
                (None, Some(booth_id)) => RatingSubject::Booth(BoothId(booth_id)),
                (Some(channel_id), Some(booth_id)) => {
                    return Err(invalid(
                        CHANNEL_RATINGS,
                        line,
                        "channel_id/booth_id",
                        &format!("{channel_id}/{booth_id}"),
                    ))
                }
                (None, None) => {
                    return Err(invalid(CHANNEL_RATINGS, line, "channel_id/booth_id", ""))
                }
            };

            Ok(ChannelRating {
                subject,
                month: month_field(CHANNEL_RATINGS, line, &row.timestamp)?,
                score: row.score,
                sample_size: row.sample_size,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct JourneyRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    steps: Option<String>,
}

pub(crate) fn parse_journeys<R: Read>(reader: R) -> Result<Vec<Journey>, DatasetImportError> {
    Ok(read_rows::<_, JourneyRow>(reader)?
        .into_iter()
        .map(|(_, row)| Journey {
            id: JourneyId(row.id),
            name: row.name,
            steps: row
                .steps
                .as_deref()
                .map(split_list)
                .unwrap_or_default()
                .into_iter()
                .map(ServiceId)
                .collect(),
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct JourneyReviewRow {
    journey_id: String,
    timestamp: String,
    score: f64,
    sample_size: u32,
}

pub(crate) fn parse_journey_reviews<R: Read>(
    reader: R,
) -> Result<Vec<JourneyReview>, DatasetImportError> {
    read_rows::<_, JourneyReviewRow>(reader)?
        .into_iter()
        .map(|(line, row)| {
            Ok(JourneyReview {
                journey_id: JourneyId(row.journey_id),
                month: month_field(JOURNEY_REVIEWS, line, &row.timestamp)?,
                score: row.score,
                sample_size: row.sample_size,
            })
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Month bucket for a `YYYY-MM`, `YYYY-MM-DD` or RFC 3339 timestamp. RFC 3339
/// timestamps are converted to UTC before the month is taken.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(month_start(dt.naive_utc().date()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(month_start(date));
    }

    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}
