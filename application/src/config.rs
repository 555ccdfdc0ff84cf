//! [`Config`]-related definitions.

use std::path::PathBuf;

use common::Month;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: Storage,

    /// Service configuration.
    pub service: Service,

    /// Dashboard configuration.
    pub dashboard: Dashboard,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Indicator whether the records are persisted into the snapshot file
    /// at [`Storage::path`], or kept in memory only and lost on exit.
    #[default(true)]
    pub persist: bool,

    /// Path of the snapshot file holding the records.
    #[default(PathBuf::from("bakery.json"))]
    pub path: PathBuf,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Indicator whether empty collections are populated with the default
    /// records on start.
    #[default(true)]
    pub seed_defaults: bool,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { seed_defaults } = value;
        Self { seed_defaults }
    }
}

/// Dashboard configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Dashboard {
    /// Year the revenue and the [`Order`]s are presented for.
    ///
    /// [`Order`]: service::domain::Order
    #[default(2025)]
    pub year: i32,

    /// Number of the month (`1` to `12`) the [`Order`]s are highlighted for.
    ///
    /// [`Order`]: service::domain::Order
    #[default(9)]
    pub month: u8,
}

impl Dashboard {
    /// Returns the configured [`Month`].
    ///
    /// # Errors
    ///
    /// If the configured month number is out of `1..=12` range.
    pub fn month(&self) -> Result<Month, ConfigError> {
        Month::try_from(self.month).map_err(|_| {
            ConfigError::Message(format!(
                "`dashboard.month` must be in `1..=12` range, got {}",
                self.month,
            ))
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Month;

    use std::path::Path;

    use super::{Config, Dashboard};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("does-not-exist.toml").unwrap();

        assert!(conf.storage.persist);
        assert_eq!(conf.storage.path, Path::new("bakery.json"));
        assert!(conf.service.seed_defaults);
        assert_eq!(conf.dashboard.year, 2025);
        assert_eq!(conf.dashboard.month().unwrap(), Month::September);
    }

    #[test]
    fn rejects_out_of_range_month() {
        let dashboard = Dashboard {
            year: 2025,
            month: 13,
        };

        assert!(dashboard.month().is_err());
    }
}
