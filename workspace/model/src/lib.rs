//! Historical incident records and the dataset they are loaded into, plus
//! per-place incident counts for the location endpoints.
//!
//! Both are read once at startup and are immutable afterwards; every other
//! crate in the workspace borrows them read-only.

pub mod dataset;
pub mod error;
pub mod location;
pub mod record;

pub use dataset::{CategorySummary, Dataset, DatasetColumns};
pub use error::{ModelError, Result};
pub use location::{LocationIndex, LocationRecord, LocationSummary};
pub use record::{HistoricalRecord, parse_timestamp};

// Re-export tracing for use in this crate
pub use tracing;
