//! Per-category incident counts by place, read from a directory of
//! location files.
//!
//! Each file holds one crime category. Its name starts with the category
//! label followed by `_` (e.g. `RIOTS_data_loc_m_y.csv` is "RIOTS"); a file
//! without `_` uses its whole stem. Lines read `place..., count, year`, where
//! the place may itself contain commas. Lines whose last two fields are not
//! integers, a header included, are skipped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::error::{ModelError, Result};

const COUNTRY_SUFFIX: &str = "India";

/// One `place, count, year` line of a location file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub place: String,
    pub count: u64,
    pub year: i32,
}

impl LocationRecord {
    /// Parses one line, or returns `None` when count or year is not an integer.
    ///
    /// Quotes are stripped, repeated place fragments collapsed, and the
    /// country appended when missing so the place can be geocoded as is.
    pub fn parse_line(line: &str) -> Option<Self> {
        let items: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if items.len() < 3 {
            return None;
        }
        let (place_items, tail) = items.split_at(items.len() - 2);
        let count = tail[0].parse::<u64>().ok()?;
        let year = tail[1].parse::<i32>().ok()?;

        let mut fragments: Vec<String> = Vec::new();
        for fragment in place_items.join(",").replace('"', "").split(',') {
            let fragment = fragment.trim();
            if !fragment.is_empty() && !fragments.iter().any(|seen| seen == fragment) {
                fragments.push(fragment.to_string());
            }
        }
        if fragments.is_empty() {
            return None;
        }

        let mut place = fragments.join(", ");
        if !place.to_lowercase().contains(&COUNTRY_SUFFIX.to_lowercase()) {
            place.push_str(", ");
            place.push_str(COUNTRY_SUFFIX);
        }
        Some(Self { place, count, year })
    }
}

/// Incidents at one place in one year, summed over every line naming it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub place: String,
    pub year: i32,
    pub count: u64,
}

impl LocationSummary {
    /// Radius in metres of the map circle drawn around the place; grows by
    /// 100 m per incident on top of a 1 km base.
    pub fn marker_radius_m(&self) -> u64 {
        1_000 + self.count * 100
    }
}

/// Location records grouped by category label.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    categories: BTreeMap<String, Vec<LocationRecord>>,
}

impl LocationIndex {
    /// Reads every `.csv` file directly inside `dir`.
    ///
    /// Files mapping to the same category are merged.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ModelError::NotFound(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| io_error(dir, source))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
            .collect();
        paths.sort();

        let mut index = Self::default();
        for path in paths {
            let Some(category) = category_from_path(&path) else {
                warn!("Cannot derive a category from {}", path.display());
                continue;
            };
            let contents = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            let before = index.categories.get(&category).map_or(0, Vec::len);
            index.extend(&category, contents.lines().filter_map(LocationRecord::parse_line));
            let added = index.categories.get(&category).map_or(0, Vec::len) - before;
            debug!("Read {} location lines for '{}' from {}", added, category, path.display());
        }

        info!("Loaded location data for {} categories", index.categories.len());
        Ok(index)
    }

    /// Adds records under `category`.
    pub fn extend(&mut self, category: &str, records: impl IntoIterator<Item = LocationRecord>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .extend(records);
    }

    /// Category labels, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Per place and year totals for `category`, optionally limited to one
    /// year, largest counts first (ties by place, then year).
    ///
    /// Returns `None` for a category with no location file.
    pub fn aggregate(&self, category: &str, year: Option<i32>) -> Option<Vec<LocationSummary>> {
        let records = self.categories.get(category)?;

        let mut totals: BTreeMap<(&str, i32), u64> = BTreeMap::new();
        for record in records.iter().filter(|record| year.is_none_or(|y| record.year == y)) {
            *totals.entry((record.place.as_str(), record.year)).or_insert(0) += record.count;
        }

        let mut summaries: Vec<LocationSummary> = totals
            .into_iter()
            .map(|((place, year), count)| LocationSummary {
                place: place.to_string(),
                year,
                count,
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.place.cmp(&b.place))
                .then(a.year.cmp(&b.year))
        });
        Some(summaries)
    }
}

fn category_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let category = stem.split('_').next()?.trim();
    (!category.is_empty()).then(|| category.to_string())
}

fn io_error(path: &Path, source: std::io::Error) -> ModelError {
    ModelError::Io {
        path: path.to_path_buf(),
        source,
    }
}
