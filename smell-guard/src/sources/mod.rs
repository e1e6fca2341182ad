//! Dataset sources.
//!
//! A [`DatasetManager`] lists the datasets it can serve and loads them on
//! demand as [`Dataset`]s ready for detection.

use crate::core::Dataset;
use crate::prelude::*;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

mod csv;

pub use csv::{CsvDatasetManager, CsvOptions};

/// Serves datasets by identifier.
///
/// # Examples
///
/// ```rust,no_run
/// use smell_guard::sources::{CsvDatasetManager, DatasetManager};
///
/// # async fn example() -> smell_guard::prelude::Result<()> {
/// let manager = CsvDatasetManager::new("data/")?;
/// for identifier in manager.available_dataset_identifiers()? {
///     let dataset = manager.get_dataset(&identifier).await?;
///     println!("{identifier}: {} columns", dataset.get_column_names().len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DatasetManager: Debug + Send + Sync {
    /// Identifiers of every dataset this manager can load.
    fn available_dataset_identifiers(&self) -> Result<BTreeSet<String>>;

    /// Loads a dataset. Unknown identifiers are [`SmellError::DataSource`]
    /// errors.
    async fn get_dataset(&self, identifier: &str) -> Result<Arc<dyn Dataset>>;
}

/// Expands glob patterns into the files they match, in pattern order.
pub(crate) fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    use glob::glob;

    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob(pattern).map_err(|e| {
            SmellError::configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        for entry in matches {
            let path = entry.map_err(|e| SmellError::Io(std::io::Error::from(e)))?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}
