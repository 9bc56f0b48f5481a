//! Yearly counts and the linear trend fitted through them.
//!
//! Before fitting, the years with the highest counts are removed from the
//! series. This drops the peak years rather than the most recent or least
//! representative ones, which tends to pull the projection downward. The
//! behavior is kept as-is; see `outliers_dropped` in [`TrendSettings`].

use model::HistoricalRecord;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Number of incidents observed in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Per-year counts ordered by descending count, ties broken by ascending year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearlySeries {
    points: Vec<YearCount>,
}

impl YearlySeries {
    /// Counts records per year.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HistoricalRecord>) -> Self {
        let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
        for record in records {
            *counts.entry(record.year()).or_insert(0) += 1;
        }

        Self::from_points(
            counts
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
        )
    }

    /// Builds a series from raw points, putting them into series order.
    pub fn from_points(mut points: Vec<YearCount>) -> Self {
        points.sort_by(|a, b| b.count.cmp(&a.count).then(a.year.cmp(&b.year)));
        Self { points }
    }

    /// Removes the `n` entries with the highest counts.
    pub fn drop_top(mut self, n: usize) -> Self {
        let n = n.min(self.points.len());
        self.points.drain(..n);
        self
    }

    /// Keeps at most `window` entries from the front of the series.
    pub fn take(mut self, window: usize) -> Self {
        self.points.truncate(window);
        self
    }

    pub fn points(&self) -> &[YearCount] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A fitted line `count = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    slope: f64,
    intercept: f64,
    points: usize,
}

impl TrendModel {
    /// Fits an ordinary least-squares line through every point of the series.
    ///
    /// Fails with [`ComputeError::DegenerateTrendFit`] when fewer than two
    /// points are available or all points share the same year.
    pub fn fit(series: &YearlySeries) -> Result<Self> {
        let points = series.points();
        let n = points.len();
        if n < 2 {
            return Err(ComputeError::DegenerateTrendFit { points: n });
        }

        let n_f = n as f64;
        let mean_x = points.iter().map(|p| p.year as f64).sum::<f64>() / n_f;
        let mean_y = points.iter().map(|p| p.count as f64).sum::<f64>() / n_f;

        // Centered sums keep the normal equations well conditioned for
        // year-sized x values.
        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
            let dx = p.year as f64 - mean_x;
            let dy = p.count as f64 - mean_y;
            (sxx + dx * dx, sxy + dx * dy)
        });

        if sxx.abs() < f64::EPSILON {
            return Err(ComputeError::DegenerateTrendFit { points: n });
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        Ok(Self {
            slope,
            intercept,
            points: n,
        })
    }

    /// Change in yearly count per year.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of points the line was fitted on.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Value of the fitted line at `year`.
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Knobs of the yearly projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSettings {
    /// Year the trend is extrapolated to
    pub target_year: i32,
    /// Number of highest-count years removed before fitting
    pub outliers_dropped: usize,
    /// Maximum number of years kept for fitting after removal; `None` fits
    /// every remaining year
    pub training_window: Option<usize>,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            target_year: 2024,
            outliers_dropped: 2,
            training_window: None,
        }
    }
}

impl TrendSettings {
    /// Applies outlier removal and the training window to a series.
    pub fn training_series(&self, series: YearlySeries) -> YearlySeries {
        let series = series.drop_top(self.outliers_dropped);
        match self.training_window {
            Some(window) => series.take(window),
            None => series,
        }
    }

    /// Fits the trend on the training part of `series` and evaluates it at
    /// the target year.
    #[instrument(skip(self, series), fields(years = series.len(), target_year = self.target_year))]
    pub fn project(&self, series: YearlySeries) -> Result<f64> {
        let training = self.training_series(series);
        debug!("Fitting trend on {} yearly points", training.len());

        let model = TrendModel::fit(&training)?;
        let projected = model.predict(self.target_year);
        debug!(
            "Trend slope {:.4}, intercept {:.4}, projected count {:.4}",
            model.slope(),
            model.intercept(),
            projected
        );

        if !projected.is_finite() {
            return Err(ComputeError::NonFiniteProjection {
                year: self.target_year,
            });
        }
        Ok(projected)
    }
}
