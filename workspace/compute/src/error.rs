use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// Not enough yearly points remain to fit a line through them
    #[error("Degenerate trend fit: {points} usable yearly data point(s), at least 2 required")]
    DegenerateTrendFit { points: usize },

    /// The fitted line produced NaN or infinity for the target year
    #[error("Trend projection for year {year} is not finite")]
    NonFiniteProjection { year: i32 },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
