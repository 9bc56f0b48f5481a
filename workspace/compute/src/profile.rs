//! Combining the projected count with the calendar shares into an hourly profile.

use crate::frequency::{CalendarField, Distributions, share_or_zero};

/// Number of entries in an [`HourlyProfile`].
pub const HOURS_PER_DAY: usize = 24;

/// Relative crime magnitude for each hour of the day.
///
/// Each entry is `projected_count * share(month) * share(day) * share(hour)`.
/// The values are not normalized and do not sum to one; every entry is >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    values: [f64; HOURS_PER_DAY],
}

impl HourlyProfile {
    /// A profile with every hour at zero.
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; HOURS_PER_DAY],
        }
    }

    /// Wraps raw values, replacing negative or NaN entries with zero.
    pub fn from_values(values: [f64; HOURS_PER_DAY]) -> Self {
        Self {
            values: values.map(|value| value.max(0.0)),
        }
    }

    /// Builds the profile for a requested month and day.
    ///
    /// A negative projection is clamped to zero before multiplying. Unseen
    /// months, days or hours contribute a zero share.
    pub fn synthesize(projected_count: f64, distributions: &Distributions, month: i32, day: i32) -> Self {
        let projected = projected_count.max(0.0);
        let month_share = share_or_zero(distributions.table(CalendarField::Month), month);
        let day_share = share_or_zero(distributions.table(CalendarField::Day), day);
        let base = projected * month_share * day_share;

        let hours = distributions.table(CalendarField::Hour);
        let mut values = [0.0; HOURS_PER_DAY];
        for (hour, value) in values.iter_mut().enumerate() {
            *value = base * share_or_zero(hours, hour as i32);
        }
        Self::from_values(values)
    }

    pub fn values(&self) -> &[f64; HOURS_PER_DAY] {
        &self.values
    }

    /// Value for `hour`, `None` when the hour is outside 0-23.
    pub fn get(&self, hour: usize) -> Option<f64> {
        self.values.get(hour).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }

    /// Largest value in the profile.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Hour with the largest value (earliest on ties), `None` for an all-zero profile.
    pub fn peak_hour(&self) -> Option<usize> {
        if self.is_all_zero() {
            return None;
        }
        let max = self.max();
        self.values.iter().position(|value| *value == max)
    }
}

impl Default for HourlyProfile {
    fn default() -> Self {
        Self::zeroed()
    }
}
