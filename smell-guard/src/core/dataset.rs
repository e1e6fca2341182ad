//! Datasets that can be profiled and checked.

use crate::prelude::*;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A tabular dataset the detector operates on.
///
/// A dataset is treated as an immutable snapshot for the duration of one
/// detection run.
#[async_trait]
pub trait Dataset: Debug + Send + Sync {
    /// A name used in logs and reports.
    fn name(&self) -> &str;

    /// The Arrow schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// The names of all columns.
    fn get_column_names(&self) -> BTreeSet<String> {
        self.schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Registers the dataset as a table of the given session context.
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()>;
}

/// A dataset held in memory as Arrow record batches.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::{Dataset, InMemoryDataset};
/// use arrow::array::Int64Array;
/// use arrow::datatypes::{DataType, Field, Schema};
/// use arrow::record_batch::RecordBatch;
/// use std::sync::Arc;
///
/// let schema = Arc::new(Schema::new(vec![Field::new("age", DataType::Int64, true)]));
/// let batch = RecordBatch::try_new(
///     schema.clone(),
///     vec![Arc::new(Int64Array::from(vec![31, 45, 27]))],
/// ).unwrap();
///
/// let dataset = InMemoryDataset::try_new("people", schema, vec![batch]).unwrap();
/// assert_eq!(dataset.num_rows(), 3);
/// assert!(dataset.get_column_names().contains("age"));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    name: String,
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl InMemoryDataset {
    /// Creates a dataset from record batches sharing `schema`.
    pub fn try_new(
        name: impl Into<String>,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(batch) = batches.iter().find(|b| b.schema() != schema) {
            return Err(SmellError::type_mismatch(
                format!("schema {schema:?}"),
                format!("batch schema {:?}", batch.schema()),
            ));
        }
        Ok(Self {
            name,
            schema,
            batches,
        })
    }

    /// Creates a dataset from a single record batch.
    pub fn from_batch(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            schema: batch.schema(),
            batches: vec![batch],
        }
    }

    /// Creates a dataset without rows.
    pub fn empty(name: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            name: name.into(),
            schema,
            batches: Vec::new(),
        }
    }

    /// The record batches of the dataset.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

#[async_trait]
impl Dataset for InMemoryDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    #[instrument(skip(self, ctx), fields(dataset.name = %self.name, table.name = %table_name))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let table = MemTable::try_new(self.schema.clone(), vec![self.batches.clone()])?;
        ctx.register_table(table_name, Arc::new(table))?;
        debug!(
            dataset.rows = self.num_rows(),
            dataset.columns = self.schema.fields().len(),
            "Registered in-memory dataset"
        );
        Ok(())
    }
}
