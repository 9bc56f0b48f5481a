//! Loading and querying the historical incident dataset.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{ModelError, Result};
use crate::record::{HistoricalRecord, parse_timestamp};

/// Names of the CSV columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetColumns {
    /// Column holding the crime category label
    pub category: String,
    /// Column holding the offence timestamp
    pub timestamp: String,
}

impl Default for DatasetColumns {
    fn default() -> Self {
        Self {
            category: "CrimeGroup_Name".to_string(),
            timestamp: "Offence_From_Date".to_string(),
        }
    }
}

/// A category label together with the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub records: usize,
}

/// The immutable set of historical records used by every prediction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<HistoricalRecord>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Loads the dataset from a CSV file with a header row.
    ///
    /// Every column is read as text; the timestamp column is parsed with
    /// [`parse_timestamp`]. Rows with an empty category or timestamp cell are
    /// skipped. A missing column or a non-empty unparseable timestamp fails
    /// the whole load.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, columns: &DatasetColumns) -> Result<Self> {
        if !path.is_file() {
            error!("Dataset file does not exist: {}", path.display());
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        debug!(
            "Reading CSV with category column '{}' and timestamp column '{}'",
            columns.category, columns.timestamp
        );
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        debug!("CSV read into DataFrame with {} rows", df.height());

        let records = records_from_dataframe(&df, columns)?;
        if records.is_empty() {
            warn!("Dataset {} contains no records", path.display());
        }

        info!("Loaded {} historical records from {}", records.len(), path.display());
        Ok(Self {
            records,
            source: Some(path.to_path_buf()),
        })
    }

    /// Builds a dataset from records that are already in memory.
    pub fn from_records(records: Vec<HistoricalRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// All records in load order.
    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose category equals `category` exactly (case-sensitive).
    ///
    /// An unknown category yields an empty subset, not an error.
    pub fn filter_category(&self, category: &str) -> Vec<&HistoricalRecord> {
        self.records
            .iter()
            .filter(|record| record.category() == category)
            .collect()
    }

    /// Distinct category labels with their record counts, sorted by label.
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(name, records)| CategorySummary {
                name: name.to_string(),
                records,
            })
            .collect()
    }

    /// First and last year covered by the records.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let years = self.records.iter().map(HistoricalRecord::year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| ModelError::MissingColumn(name.to_string()))?;
    Ok(column.str()?)
}

/// A cell with content; null and whitespace-only cells count as empty.
fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|value| !value.trim().is_empty())
}

fn records_from_dataframe(df: &DataFrame, columns: &DatasetColumns) -> Result<Vec<HistoricalRecord>> {
    let categories = string_column(df, &columns.category)?;
    let timestamps = string_column(df, &columns.timestamp)?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for (index, (category, timestamp)) in categories.into_iter().zip(timestamps).enumerate() {
        // 1-based data row, header excluded
        let row = index + 1;
        let (Some(category), Some(raw)) = (present(category), present(timestamp)) else {
            debug!("Skipping row {} with an empty category or timestamp", row);
            skipped += 1;
            continue;
        };

        let timestamp = parse_timestamp(raw).ok_or_else(|| ModelError::InvalidTimestamp {
            row,
            value: raw.to_string(),
        })?;
        records.push(HistoricalRecord::new(category, timestamp));
    }

    if skipped > 0 {
        warn!("Skipped {} rows with an empty category or timestamp", skipped);
    }
    Ok(records)
}
