use crate::dataset::parse_month;
use crate::scoring::trend::month_start;
use crate::scoring::ScoringConfig;
use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = env::var("SCORECARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/sample"));

        let mut scoring = match env::var("SCORECARD_WEIGHTS") {
            Ok(path) if !path.trim().is_empty() => load_scoring_config(path.trim())?,
            _ => ScoringConfig::default(),
        };

        if let Ok(raw) = env::var("SCORECARD_TREND_BUCKETS") {
            if !raw.trim().is_empty() {
                scoring.trend_buckets = parse_trend_buckets(&raw)?;
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig { data_dir },
            scoring,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the dataset exports live.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
}

/// Reads a JSON weight override file and rejects unusable weights. Trend
/// buckets are moved to the first day of their month.
pub fn load_scoring_config<P: AsRef<Path>>(path: P) -> Result<ScoringConfig, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::WeightsFile {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })?;
    let mut config: ScoringConfig =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::WeightsFile {
                path: path.to_path_buf(),
                reason: source.to_string(),
            }
        })?;

    if let Some((name, value)) = config.invalid_weight() {
        return Err(ConfigError::InvalidWeight { name, value });
    }

    config.trend_buckets = config
        .trend_buckets
        .into_iter()
        .map(month_start)
        .collect();

    Ok(config)
}

/// Parses a comma-separated list of `YYYY-MM` (or full date) buckets.
pub fn parse_trend_buckets(raw: &str) -> Result<Vec<NaiveDate>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            parse_month(value).ok_or_else(|| ConfigError::InvalidTrendBucket {
                value: value.to_string(),
            })
        })
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTrendBucket { value: String },
    WeightsFile { path: PathBuf, reason: String },
    InvalidWeight { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTrendBucket { value } => {
                write!(f, "trend bucket '{}' must be YYYY-MM or YYYY-MM-DD", value)
            }
            ConfigError::WeightsFile { path, reason } => {
                write!(f, "unable to load weights from {}: {}", path.display(), reason)
            }
            ConfigError::InvalidWeight { name, value } => {
                write!(f, "weight {} must be a non-negative number, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTrendBucket { .. }
            | ConfigError::WeightsFile { .. }
            | ConfigError::InvalidWeight { .. } => None,
        }
    }
}
