//! Empirical frequency tables over calendar units.
//!
//! Month, day-of-month and hour are each tabulated on their own. No joint or
//! conditional distribution is built: the three dimensions are treated as
//! statistically independent, and a profile simply multiplies their shares.

use model::HistoricalRecord;
use std::collections::BTreeMap;

/// The calendar unit a [`FrequencyTable`] is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    Month,
    Day,
    Hour,
}

impl CalendarField {
    /// Every field, coarsest first.
    pub const ALL: [CalendarField; 3] = [CalendarField::Month, CalendarField::Day, CalendarField::Hour];

    /// Extracts this field's value from a record.
    pub fn key(self, record: &HistoricalRecord) -> i32 {
        let value = match self {
            CalendarField::Month => record.month(),
            CalendarField::Day => record.day(),
            CalendarField::Hour => record.hour(),
        };
        // chrono bounds these to at most 31
        value as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            CalendarField::Month => "month",
            CalendarField::Day => "day",
            CalendarField::Hour => "hour",
        }
    }
}

/// Observed counts per calendar key plus their total.
///
/// The total always equals the sum of the per-key counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<i32, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabulates `field` over the given records.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a HistoricalRecord>,
        field: CalendarField,
    ) -> Self {
        records
            .into_iter()
            .map(|record| field.key(record))
            .collect()
    }

    /// Adds one observation of `key`.
    pub fn observe(&mut self, key: i32) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of observations of `key`; 0 when the key was never seen.
    pub fn count(&self, key: i32) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Total number of observations across all keys.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Normalized share of `key`, see [`share_or_zero`].
    pub fn share(&self, key: i32) -> f64 {
        share_or_zero(self, key)
    }

    /// Iterates `(key, count)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }

    /// Number of distinct keys observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<i32> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.observe(key);
        }
        table
    }
}

/// The zero-fallback lookup policy: `count / total` for a seen key, and
/// exactly 0 when the key is absent or the table is empty.
///
/// Out-of-range inputs such as month 13 or day -1 are simply absent keys.
pub fn share_or_zero(table: &FrequencyTable, key: i32) -> f64 {
    if table.total == 0 {
        return 0.0;
    }
    match table.count(key) {
        0 => 0.0,
        count => count as f64 / table.total as f64,
    }
}

/// The three independent frequency tables of one category subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distributions {
    pub month: FrequencyTable,
    pub day: FrequencyTable,
    pub hour: FrequencyTable,
}

impl Distributions {
    /// Builds the month, day and hour tables from the same records.
    pub fn build(records: &[&HistoricalRecord]) -> Self {
        let table = |field| FrequencyTable::from_records(records.iter().copied(), field);
        Self {
            month: table(CalendarField::Month),
            day: table(CalendarField::Day),
            hour: table(CalendarField::Hour),
        }
    }

    /// The table for a given calendar field.
    pub fn table(&self, field: CalendarField) -> &FrequencyTable {
        match field {
            CalendarField::Month => &self.month,
            CalendarField::Day => &self.day,
            CalendarField::Hour => &self.hour,
        }
    }
}
