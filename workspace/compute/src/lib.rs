//! Heuristic hourly crime estimates from historical frequencies.
//!
//! A prediction filters the dataset by category, tabulates month, day and
//! hour frequencies, projects the yearly count with a linear trend and
//! multiplies everything into a 24-entry [`HourlyProfile`].

pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod profile;
pub mod trend;

pub use error::{ComputeError, Result};
pub use frequency::{CalendarField, Distributions, FrequencyTable, share_or_zero};
pub use pipeline::{Prediction, PredictionRequest, predict};
pub use profile::{HOURS_PER_DAY, HourlyProfile};
pub use trend::{TrendModel, TrendSettings, YearCount, YearlySeries};
