use compute::{PredictionRequest, TrendSettings};
use model::{CategorySummary, Dataset, LocationIndex, LocationSummary};
use render::ChartRenderer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Historical records, loaded once at startup and never mutated
    pub dataset: Arc<Dataset>,
    /// Parameters of the yearly projection
    pub trend: TrendSettings,
    /// Chart renderer used for prediction responses
    pub renderer: Arc<dyn ChartRenderer>,
    /// Incident counts by place, per category
    pub locations: Arc<LocationIndex>,
}

impl AppState {
    pub fn new(dataset: Dataset, trend: TrendSettings, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            dataset: Arc::new(dataset),
            trend,
            renderer,
            locations: Arc::new(LocationIndex::default()),
        }
    }

    pub fn with_locations(mut self, locations: LocationIndex) -> Self {
        self.locations = Arc::new(locations);
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("records", &self.dataset.len())
            .field("trend", &self.trend)
            .field("location_categories", &self.locations.categories().len())
            .finish_non_exhaustive()
    }
}

/// Form body of `POST /predict`
///
/// Month and day arrive as text so that a non-integer value can be reported
/// as a client error instead of a generic rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PredictForm {
    /// Month of the year (1-12)
    #[serde(default)]
    pub month: String,
    /// Day of the month (1-31)
    #[serde(default)]
    pub day: String,
    /// Crime category, matched case-sensitively
    #[serde(default)]
    pub category: String,
}

impl PredictForm {
    /// Parses month and day into integers.
    ///
    /// Values are not range-checked; an out-of-range month or day simply
    /// matches no historical data.
    pub fn into_request(self) -> Result<PredictionRequest, AppError> {
        let month = parse_integer("month", &self.month)?;
        let day = parse_integer("day", &self.day)?;
        Ok(PredictionRequest {
            month,
            day,
            category: self.category,
        })
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<i32, AppError> {
    value.trim().parse::<i32>().map_err(|_| AppError::InvalidInput {
        field,
        value: value.to_string(),
    })
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// A crime category present in the dataset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CategoryResponse {
    /// Category label as it appears in the dataset
    pub name: String,
    /// Number of historical records with this label
    pub records: usize,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            name: summary.name,
            records: summary.records,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Incidents recorded at one place in one year
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LocationResponse {
    /// Place name, suffixed with the country for geocoding
    pub place: String,
    pub year: i32,
    /// Number of incidents
    pub count: u64,
    /// Radius in metres of the marker circle
    pub radius_m: u64,
}

impl From<LocationSummary> for LocationResponse {
    fn from(summary: LocationSummary) -> Self {
        Self {
            radius_m: summary.marker_radius_m(),
            place: summary.place,
            year: summary.year,
            count: summary.count,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of loaded historical records
    pub records: usize,
    /// Number of distinct categories
    pub categories: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::categories::get_categories,
        crate::handlers::predict::predict,
        crate::handlers::locations::get_locations,
        crate::handlers::locations::get_location_categories,
    ),
    components(
        schemas(
            ApiResponse<Vec<CategoryResponse>>,
            ApiResponse<Vec<LocationResponse>>,
            ApiResponse<Vec<String>>,
            CategoryResponse,
            ErrorResponse,
            HealthResponse,
            LocationResponse,
            PredictForm,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Dataset category endpoints"),
        (name = "prediction", description = "Hourly crime likelihood endpoints"),
        (name = "locations", description = "Incident counts by place"),
    ),
    info(
        title = "Crimecast API",
        description = "Heuristic hourly crime likelihood estimates from a historical incident dataset",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
