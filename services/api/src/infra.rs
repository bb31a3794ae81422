use chrono::NaiveDate;
use cx_scorecard::config::{load_scoring_config, AppConfig};
use cx_scorecard::dataset::{parse_month, ScorecardDataset};
use cx_scorecard::error::AppError;
use cx_scorecard::scoring::trend::trailing_months;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) const DEFAULT_TREND_MONTHS: usize = 6;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_bucket(raw: &str) -> Result<NaiveDate, String> {
    parse_month(raw).ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM"))
}

/// Loads the environment config, then applies the command-line overrides.
/// A weights file without trend buckets keeps the buckets from the environment.
pub(crate) fn load_config(
    data_dir: Option<PathBuf>,
    weights: Option<PathBuf>,
) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;

    if let Some(dir) = data_dir {
        config.data.data_dir = dir;
    }
    if let Some(path) = weights {
        let mut scoring = load_scoring_config(path)?;
        if scoring.trend_buckets.is_empty() {
            scoring.trend_buckets = std::mem::take(&mut config.scoring.trend_buckets);
        }
        config.scoring = scoring;
    }

    Ok(config)
}

/// Explicit buckets win, then configured ones, then the trailing `months`
/// ending at the most recent month in the dataset.
pub(crate) fn resolve_buckets(
    explicit: Vec<NaiveDate>,
    configured: &[NaiveDate],
    dataset: &ScorecardDataset,
    months: usize,
) -> Vec<NaiveDate> {
    if !explicit.is_empty() {
        return explicit;
    }
    if !configured.is_empty() {
        return configured.to_vec();
    }

    dataset
        .latest_month()
        .map(|latest| trailing_months(latest, months))
        .unwrap_or_default()
}
