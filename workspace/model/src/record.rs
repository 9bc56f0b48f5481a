use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Date-time layouts accepted in the timestamp column, tried in order.
///
/// `%.f` accepts an optional fractional second, so "12:30:00" and
/// "12:30:00.250" both match the same layout.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts; such values are placed at midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d/%m/%Y"];

/// Parses a timestamp cell into a naive date-time.
///
/// RFC 3339 values keep their local wall-clock time; the offset is dropped so
/// that the hour matches what was recorded at the scene.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// One row of the historical dataset: a crime category and when it happened.
///
/// Calendar fields are derived from the timestamp on access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalRecord {
    category: String,
    timestamp: NaiveDateTime,
}

impl HistoricalRecord {
    /// Creates a new HistoricalRecord.
    pub fn new(category: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            category: category.into(),
            timestamp,
        }
    }

    /// Gets the category label of the record.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Gets the event timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar year of the event.
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Month of the event (1-12).
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// Day of month of the event (1-31).
    pub fn day(&self) -> u32 {
        self.timestamp.day()
    }

    /// Hour of the event (0-23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}
