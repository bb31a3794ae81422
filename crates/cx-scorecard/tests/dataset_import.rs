use std::path::PathBuf;

use chrono::NaiveDate;
use cx_scorecard::dataset::DatasetImporter;
use cx_scorecard::scoring::domain::{
    BoothId, ChannelId, ChannelType, EntityId, JourneyId, Phase, RatingSubject, ReviewChannel,
    ServiceKind,
};

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample")
}

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

#[test]
fn sample_exports_load_completely() {
    let dataset = DatasetImporter::from_dir(sample_dir()).expect("sample data imports");

    assert_eq!(dataset.entities.len(), 2);
    assert_eq!(dataset.services.len(), 4);
    assert_eq!(dataset.channels.len(), 6);
    assert_eq!(dataset.booths.len(), 3);
    assert_eq!(dataset.service_reviews.len(), 16);
    assert_eq!(dataset.channel_ratings.len(), 12);
    assert_eq!(dataset.journeys.len(), 3);
    assert_eq!(dataset.journey_reviews.len(), 5);
    assert_eq!(dataset.latest_month(), Some(month(2024, 3)));
}

#[test]
fn labels_are_normalised_on_import() {
    let dataset = DatasetImporter::from_dir(sample_dir()).expect("sample data imports");

    let kinds: Vec<_> = dataset.services.iter().map(|service| service.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ServiceKind::Simple,
            ServiceKind::Multiphase,
            ServiceKind::Simple,
            ServiceKind::Multiphase,
        ]
    );

    let types: Vec<_> = dataset
        .channels
        .iter()
        .map(|channel| channel.channel_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ChannelType::App,
            ChannelType::Web,
            ChannelType::ServiceCenter,
            ChannelType::SharedPlatform,
            ChannelType::App,
            ChannelType::ServiceCenter,
        ]
    );

    assert_eq!(
        dataset.services[3].journeys,
        vec![JourneyId::new("j-family"), JourneyId::new("j-move")]
    );
    assert!(dataset.journeys[2].steps.is_empty());
}

#[test]
fn timestamps_collapse_to_month_buckets() {
    let dataset = DatasetImporter::from_dir(sample_dir()).expect("sample data imports");

    let first = &dataset.service_reviews[0];
    assert_eq!(first.month, month(2024, 1));
    assert_eq!(first.channel, ReviewChannel::App);
    assert_eq!(first.phase, None);

    let process = &dataset.service_reviews[7];
    assert_eq!(process.phase, Some(Phase::Process));

    let ratings = &dataset.channel_ratings;
    assert_eq!(
        ratings[0].subject,
        RatingSubject::Channel(ChannelId::new("ch-t-app"))
    );
    assert_eq!(ratings[1].month, month(2024, 2));
    assert_eq!(ratings[5].subject, RatingSubject::Booth(BoothId::new("b-t-1")));
}

#[test]
fn scoping_keeps_only_the_entity_records() {
    let dataset = DatasetImporter::from_dir(sample_dir()).expect("sample data imports");

    let registry = dataset.scoped_to(&EntityId::new("ent-registry"));

    assert_eq!(registry.entities.len(), 1);
    assert_eq!(registry.services.len(), 2);
    assert_eq!(registry.channels.len(), 2);
    assert_eq!(registry.booths.len(), 1);
    assert_eq!(registry.service_reviews.len(), 4);
    assert_eq!(registry.channel_ratings.len(), 2);
    assert_eq!(registry.journeys.len(), 3);
}
