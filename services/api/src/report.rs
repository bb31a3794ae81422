use crate::infra::{load_config, parse_bucket, resolve_buckets, DEFAULT_TREND_MONTHS};
use chrono::NaiveDate;
use clap::Args;
use cx_scorecard::dashboard::{
    DashboardService, EntityScorecardView, EntityTrendView, InMemorySource,
};
use cx_scorecard::dataset::DatasetImporter;
use cx_scorecard::error::AppError;
use cx_scorecard::scoring::domain::{ChannelType, EntityId};
use cx_scorecard::scoring::ScorecardEngine;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Directory holding the CSV exports (defaults to SCORECARD_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// JSON file overriding the scoring weights
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// Entity identifier as it appears in entities.csv
    #[arg(long)]
    pub(crate) entity: String,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Print JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrendArgs {
    /// Entity identifier as it appears in entities.csv
    #[arg(long)]
    pub(crate) entity: String,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Month bucket (YYYY-MM); repeat to list several, order is kept
    #[arg(long, value_parser = parse_bucket)]
    pub(crate) bucket: Vec<NaiveDate>,
    /// Trailing months to show when no buckets are configured
    #[arg(long, default_value_t = DEFAULT_TREND_MONTHS)]
    pub(crate) months: usize,
    /// Print JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let ScorecardArgs {
        entity,
        source,
        json,
    } = args;

    let config = load_config(source.data_dir, source.weights)?;
    let dataset = DatasetImporter::from_dir(&config.data.data_dir)?;
    let service = DashboardService::new(
        Arc::new(InMemorySource::new(dataset)),
        ScorecardEngine::new(config.scoring),
    );

    let view = service.scorecard(&EntityId::new(entity))?;
    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_scorecard(&view));
    }

    Ok(())
}

pub(crate) fn run_trend(args: TrendArgs) -> Result<(), AppError> {
    let TrendArgs {
        entity,
        source,
        bucket,
        months,
        json,
    } = args;

    let config = load_config(source.data_dir, source.weights)?;
    let dataset = DatasetImporter::from_dir(&config.data.data_dir)?;
    let buckets = resolve_buckets(bucket, &config.scoring.trend_buckets, &dataset, months);
    let scoring = config.scoring.with_trend_buckets(buckets);
    let service = DashboardService::new(
        Arc::new(InMemorySource::new(dataset)),
        ScorecardEngine::new(scoring),
    );

    let view = service.trend(&EntityId::new(entity))?;
    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_trend(&view));
    }

    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn render_scorecard(view: &EntityScorecardView) -> String {
    let scorecard = &view.scorecard;
    let mut lines = vec![
        format!("{} ({})", view.entity.name, view.entity.id),
        format!("Entity score   {:>6.2}", scorecard.entity_score),
        format!(
            "- Service score {:>6.2} from {} reviews",
            scorecard.service_score, scorecard.review_volume
        ),
        format!(
            "- Channel score {:>6.2} from {} ratings",
            scorecard.channel_score, scorecard.rating_volume
        ),
        String::new(),
        "Channels".to_string(),
    ];

    for channel_type in ChannelType::scored() {
        let line = match scorecard.channels.category(channel_type) {
            Some(score) => format!("  - {:<15} {:>6.2}", channel_type.label(), score),
            None => format!("  - {:<15}    n/a (weight redistributed)", channel_type.label()),
        };
        lines.push(line);
    }

    lines.push(String::new());
    lines.push("Services".to_string());
    if scorecard.services.is_empty() {
        lines.push("  (no services)".to_string());
    }
    for service in &scorecard.services {
        let journey = match service.journey_score {
            Some(score) => format!(
                " | journey {:.2} ({:+.2}, {})",
                score, service.journey_influence, service.influence_label
            ),
            None => String::new(),
        };
        lines.push(format!(
            "  - {} [{}] standalone {:.2} | overall {:.2}{} | {} reviews",
            service.name,
            service.kind_label,
            service.standalone,
            service.overall,
            journey,
            service.review_volume
        ));
    }

    lines.join("\n") + "\n"
}

pub(crate) fn render_trend(view: &EntityTrendView) -> String {
    let mut lines = vec![format!("{} ({}) trend", view.entity.name, view.entity.id)];

    if view.points.is_empty() {
        lines.push("  (no trend buckets)".to_string());
    } else {
        lines.push(format!(
            "  {:<8} {:>7} {:>8} {:>8} {:>7}",
            "month", "entity", "service", "channel", "volume"
        ));
    }
    for point in &view.points {
        lines.push(format!(
            "  {:<8} {:>7.2} {:>8.2} {:>8.2} {:>7}",
            point.date.format("%Y-%m").to_string(),
            point.entity_score,
            point.service_score,
            point.channel_score,
            point.volume
        ));
    }

    lines.join("\n") + "\n"
}
