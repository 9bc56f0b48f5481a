use anyhow::{Context, Result};
use compute::{Prediction, PredictionRequest};
use render::ChartRenderer;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, trace};

use crate::config::{load_dataset, Settings};

/// Runs one prediction and prints the hourly profile to stdout.
///
/// With `output`, the rendered chart is also written to that file.
pub fn predict(settings: &Settings, month: i32, day: i32, category: String, output: Option<&Path>) -> Result<()> {
    trace!("Entering predict command");
    let dataset = load_dataset(settings)?;
    let request = PredictionRequest { month, day, category };
    debug!("Running prediction: {:?}", request);

    let prediction = compute::predict(&dataset, &request, &settings.trend_settings())?;
    print!("{}", PredictionReport(&prediction));

    if let Some(path) = output {
        let chart = settings.chart().render(&prediction.profile)?;
        std::fs::write(path, chart.into_bytes())
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        info!("Chart written to {}", path.display());
    }

    Ok(())
}

/// Plain text report of a prediction: a short header followed by one
/// `hour<TAB>value` line per hour.
pub struct PredictionReport<'a>(pub &'a Prediction);

impl fmt::Display for PredictionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prediction = self.0;
        writeln!(f, "category: {}", prediction.category)?;
        writeln!(f, "date: month {} day {}", prediction.month, prediction.day)?;
        writeln!(f, "matched records: {}", prediction.matched_records)?;
        writeln!(
            f,
            "projected {} count: {:.4}",
            prediction.target_year, prediction.projected_count
        )?;
        if !prediction.has_data() {
            writeln!(f, "no historical records for this category")?;
        }
        for (hour, value) in prediction.profile.iter().enumerate() {
            writeln!(f, "{:02}\t{:.6}", hour, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::HourlyProfile;

    #[test]
    fn test_report_lists_every_hour() {
        let mut values = [0.0; 24];
        values[14] = 1.25;
        let prediction = Prediction {
            category: "Theft".to_string(),
            month: 3,
            day: 10,
            target_year: 2024,
            matched_records: 36,
            projected_count: 10.0,
            profile: HourlyProfile::from_values(values),
        };

        let report = PredictionReport(&prediction).to_string();
        assert!(report.contains("category: Theft"));
        assert!(report.contains("projected 2024 count: 10.0000"));
        assert!(report.contains("14\t1.250000"));
        assert!(!report.contains("no historical records"));
        assert_eq!(report.lines().filter(|line| line.contains('\t')).count(), 24);
    }

    #[test]
    fn test_report_without_data() {
        let prediction = Prediction {
            category: "Piracy".to_string(),
            month: 3,
            day: 10,
            target_year: 2024,
            matched_records: 0,
            projected_count: 0.0,
            profile: HourlyProfile::zeroed(),
        };

        let report = PredictionReport(&prediction).to_string();
        assert!(report.contains("no historical records for this category"));
        assert!(report.contains("00\t0.000000"));
    }
}
