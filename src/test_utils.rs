#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use compute::TrendSettings;
    use model::{Dataset, HistoricalRecord, LocationIndex, LocationRecord};
    use render::SvgBarChart;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    fn record(category: &str, year: i32, month: u32, day: u32, hour: u32) -> HistoricalRecord {
        let timestamp = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        HistoricalRecord::new(category, timestamp)
    }

    /// Historical records used by the web tests.
    ///
    /// "Theft" has `year - 2014` records in each year 2015-2022, all on
    /// March 10 at 14:00. Dropping the two busiest years leaves a perfect
    /// line through 2015-2020 that projects to 10 in 2024.
    /// "Burglary" spans only two years, too few to fit a trend.
    pub fn test_records() -> Vec<HistoricalRecord> {
        let mut records = Vec::new();
        for year in 2015..=2022 {
            for _ in 0..(year - 2014) {
                records.push(record("Theft", year, 3, 10, 14));
            }
        }
        records.push(record("Burglary", 2019, 7, 4, 2));
        records.push(record("Burglary", 2020, 7, 4, 3));
        records
    }

    /// The same records as a CSV file with the default column names.
    pub fn write_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temporary CSV");
        writeln!(file, "CrimeGroup_Name,Offence_From_Date").unwrap();
        for record in test_records() {
            writeln!(
                file,
                "{},{}",
                record.category(),
                record.timestamp().format("%Y-%m-%d %H:%M:%S")
            )
            .unwrap();
        }
        file.flush().unwrap();
        file
    }

    /// Location data for the "RIOTS" category: Hubballi twice in 2019,
    /// Mysuru once in 2020.
    pub fn test_locations() -> LocationIndex {
        let mut index = LocationIndex::default();
        index.extend(
            "RIOTS",
            ["Hubballi,3,2019", "Hubballi,2,2019", "Mysuru,1,2020"]
                .into_iter()
                .filter_map(LocationRecord::parse_line),
        );
        index
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let dataset = Dataset::from_records(test_records());
        AppState::new(dataset, TrendSettings::default(), Arc::new(SvgBarChart::default()))
            .with_locations(test_locations())
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from the RUST_LOG environment variable,
    /// defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    ///
    /// The returned guard keeps the test subscriber installed; hold it for
    /// the duration of the test.
    pub fn setup_test_app() -> (Router, tracing::subscriber::DefaultGuard) {
        let guard = init_test_tracing();
        (create_router(setup_test_app_state()), guard)
    }
}
