use anyhow::{Context, Result};
use compute::TrendSettings;
use config::{Config, Environment, File};
use model::{Dataset, DatasetColumns, LocationIndex};
use render::SvgBarChart;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::schemas::AppState;

/// Name (without extension) of the optional configuration file looked up in
/// the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "crimecast";

/// Prefix of the environment variables overriding settings, e.g.
/// `CRIMECAST_DATASET_PATH`.
pub const ENV_PREFIX: &str = "CRIMECAST";

/// Application settings.
///
/// Sources, lowest priority first: built-in defaults, the configuration file,
/// `CRIMECAST_*` environment variables, then command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// CSV file with the historical incidents
    pub dataset_path: PathBuf,
    /// Directory of per-category location files; unset serves no locations
    #[serde(default)]
    pub locations_dir: Option<PathBuf>,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// CSV column holding the crime category
    pub category_column: String,
    /// CSV column holding the offence timestamp
    pub timestamp_column: String,
    /// Year the yearly trend is projected to
    pub target_year: i32,
    /// Highest-count years removed before fitting the trend
    pub outliers_dropped: usize,
    /// Maximum number of years used for fitting; unset fits every remaining year
    #[serde(default)]
    pub training_window: Option<usize>,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Settings {
    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// When `config_file` is given it must exist; otherwise `crimecast.toml`
    /// (or any format `config` understands) is read if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let columns = DatasetColumns::default();
        let trend = TrendSettings::default();
        let chart = SvgBarChart::default();
        let (chart_width, chart_height) = chart.size();

        let mut builder = Config::builder()
            .set_default("dataset_path", "df.csv")?
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("category_column", columns.category)?
            .set_default("timestamp_column", columns.timestamp)?
            .set_default("target_year", i64::from(trend.target_year))?
            .set_default("outliers_dropped", trend.outliers_dropped as i64)?
            .set_default("chart_width", i64::from(chart_width))?
            .set_default("chart_height", i64::from(chart_height))?;

        // An absent window means every remaining year is fitted
        if let Some(window) = trend.training_window {
            builder = builder.set_default("training_window", window as i64)?;
        }

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize::<Settings>()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    /// Replaces the dataset path and bind address when given on the command line.
    pub fn with_overrides(mut self, dataset_path: Option<PathBuf>, bind_address: Option<String>) -> Self {
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        if let Some(address) = bind_address {
            self.bind_address = address;
        }
        self
    }

    /// Replaces the location directory when given on the command line.
    pub fn with_locations_dir(mut self, locations_dir: Option<PathBuf>) -> Self {
        if locations_dir.is_some() {
            self.locations_dir = locations_dir;
        }
        self
    }

    pub fn dataset_columns(&self) -> DatasetColumns {
        DatasetColumns {
            category: self.category_column.clone(),
            timestamp: self.timestamp_column.clone(),
        }
    }

    pub fn trend_settings(&self) -> TrendSettings {
        TrendSettings {
            target_year: self.target_year,
            outliers_dropped: self.outliers_dropped,
            training_window: self.training_window,
        }
    }

    pub fn chart(&self) -> SvgBarChart {
        SvgBarChart::new(self.chart_width, self.chart_height)
    }
}

/// Loads the dataset configured in `settings`.
///
/// Failure here is fatal: nothing can be served without the data.
pub fn load_dataset(settings: &Settings) -> Result<Dataset> {
    Dataset::load(&settings.dataset_path, &settings.dataset_columns())
        .with_context(|| format!("Failed to load dataset {}", settings.dataset_path.display()))
}

/// Loads the location files, or an empty index when no directory is set.
pub fn load_locations(settings: &Settings) -> Result<LocationIndex> {
    match &settings.locations_dir {
        Some(dir) => LocationIndex::load_dir(dir)
            .with_context(|| format!("Failed to load location files from {}", dir.display())),
        None => Ok(LocationIndex::default()),
    }
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let dataset = load_dataset(settings)?;
    let locations = load_locations(settings)?;
    Ok(AppState::new(dataset, settings.trend_settings(), Arc::new(settings.chart())).with_locations(locations))
}
