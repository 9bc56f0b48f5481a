use anyhow::Result;
use tracing::debug;

use crate::config::{load_dataset, Settings};

/// Prints every category in the dataset with its record count.
pub fn list_categories(settings: &Settings) -> Result<()> {
    let dataset = load_dataset(settings)?;
    let categories = dataset.categories();
    debug!("Dataset has {} categories", categories.len());

    for category in categories {
        println!("{}\t{}", category.name, category.records);
    }
    if let Some((first, last)) = dataset.year_range() {
        println!("# {} records, years {}-{}", dataset.len(), first, last);
    }
    Ok(())
}
