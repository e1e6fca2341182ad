//! CSV directories as dataset sources.

use super::{expand_globs, DatasetManager};
use crate::core::{Dataset, InMemoryDataset};
use crate::prelude::*;
use async_trait::async_trait;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

/// Options for reading CSV files.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether files start with a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Maximum records read for schema inference
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            schema_infer_max_records: 1000,
        }
    }
}

/// Serves every `*.csv` file of a directory, identified by file stem.
///
/// Column types are inferred by DataFusion from the first
/// `schema_infer_max_records` rows of each file.
#[derive(Debug, Clone)]
pub struct CsvDatasetManager {
    directory: PathBuf,
    options: CsvOptions,
}

impl CsvDatasetManager {
    /// Creates a manager for a directory.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(directory, CsvOptions::default())
    }

    /// Creates a manager with custom CSV options.
    pub fn with_options(directory: impl Into<PathBuf>, options: CsvOptions) -> Result<Self> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(SmellError::data_source(
                "csv",
                format!("'{}' is not a directory", directory.display()),
            ));
        }
        Ok(Self { directory, options })
    }

    /// The served directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn files(&self) -> Result<BTreeMap<String, PathBuf>> {
        let directory = self.directory.to_str().ok_or_else(|| {
            SmellError::configuration("Directory path contains invalid UTF-8")
        })?;
        let pattern = format!(
            "{}{}*.csv",
            glob::Pattern::escape(directory),
            std::path::MAIN_SEPARATOR
        );

        Ok(expand_globs(&[pattern])?
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?.to_string();
                Some((stem, path))
            })
            .collect())
    }
}

#[async_trait]
impl DatasetManager for CsvDatasetManager {
    fn available_dataset_identifiers(&self) -> Result<BTreeSet<String>> {
        Ok(self.files()?.into_keys().collect())
    }

    #[instrument(skip(self), fields(directory = %self.directory.display()))]
    async fn get_dataset(&self, identifier: &str) -> Result<Arc<dyn Dataset>> {
        let files = self.files()?;
        let path = files.get(identifier).ok_or_else(|| {
            SmellError::data_source(
                "csv",
                format!(
                    "Unknown dataset '{identifier}' in '{}'",
                    self.directory.display()
                ),
            )
        })?;
        let url = file_url(path)?;

        let ctx = SessionContext::new();
        let read_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .schema_infer_max_records(self.options.schema_infer_max_records);
        let df = ctx.read_csv(url.as_str(), read_options).await?;
        let logical_schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        let schema = batches
            .first()
            .map(|batch| batch.schema())
            .unwrap_or(logical_schema);

        let dataset = InMemoryDataset::try_new(identifier, schema, batches)?;
        debug!(
            dataset.rows = dataset.num_rows(),
            dataset.columns = dataset.schema().fields().len(),
            "Read CSV file"
        );
        info!(dataset.name = %identifier, "Loaded dataset");
        Ok(Arc::new(dataset))
    }
}

/// DataFusion reads glob characters in a plain path as a pattern; a
/// `file://` URL is taken literally.
fn file_url(path: &Path) -> Result<Url> {
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute).map_err(|()| {
        SmellError::configuration(format!(
            "'{}' cannot be expressed as a file URL",
            absolute.display()
        ))
    })
}
