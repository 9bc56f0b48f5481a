//! The per-request prediction: filter, tabulate, project, synthesize.

use model::Dataset;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::frequency::{CalendarField, Distributions};
use crate::profile::HourlyProfile;
use crate::trend::{TrendSettings, YearlySeries};

/// What the caller asks for. Month and day are not range-checked; values
/// outside the calendar simply have no historical share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub month: i32,
    pub day: i32,
    pub category: String,
}

/// Outcome of one prediction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category: String,
    pub month: i32,
    pub day: i32,
    pub target_year: i32,
    /// Records in the dataset matching the category
    pub matched_records: usize,
    /// Extrapolated yearly count for the target year
    pub projected_count: f64,
    pub profile: HourlyProfile,
}

impl Prediction {
    /// Whether the category matched any historical record.
    pub fn has_data(&self) -> bool {
        self.matched_records > 0
    }
}

/// Runs the full prediction pipeline over the dataset.
///
/// An unknown category is not an error: it produces an all-zero profile with
/// no matched records. A category with too few distinct years to fit a trend
/// fails with [`crate::ComputeError::DegenerateTrendFit`].
#[instrument(skip(dataset, settings))]
pub fn predict(dataset: &Dataset, request: &PredictionRequest, settings: &TrendSettings) -> Result<Prediction> {
    let subset = dataset.filter_category(&request.category);
    debug!("Category '{}' matched {} records", request.category, subset.len());

    if subset.is_empty() {
        info!("No historical records for category '{}', returning empty profile", request.category);
        return Ok(Prediction {
            category: request.category.clone(),
            month: request.month,
            day: request.day,
            target_year: settings.target_year,
            matched_records: 0,
            projected_count: 0.0,
            profile: HourlyProfile::zeroed(),
        });
    }

    let distributions = Distributions::build(&subset);
    for field in CalendarField::ALL {
        let table = distributions.table(field);
        debug!("{} table: {} distinct keys over {} records", field.name(), table.len(), table.total());
    }

    let series = YearlySeries::from_records(subset.iter().copied());
    let projected_count = settings.project(series)?;

    let profile = HourlyProfile::synthesize(projected_count, &distributions, request.month, request.day);
    info!(
        "Prediction for '{}' on {}/{}: projected {:.2} incidents in {}, peak hour {:?}",
        request.category,
        request.month,
        request.day,
        projected_count,
        settings.target_year,
        profile.peak_hour()
    );

    Ok(Prediction {
        category: request.category.clone(),
        month: request.month,
        day: request.day,
        target_year: settings.target_year,
        matched_records: subset.len(),
        projected_count,
        profile,
    })
}
