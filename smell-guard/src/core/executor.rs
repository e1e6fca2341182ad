//! Execution of check batteries against data.

use crate::checkers::{CellValue, Checker, Parameters};
use crate::core::{Battery, CheckOutcome, CheckSpec, Dataset, RuleRegistry, DEFAULT_SAMPLE_SIZE};
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use crate::security::SqlSecurity;
use crate::{log_check, log_data_op, perf_debug};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type, Int64Type, UInt64Type};
use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Runs a battery against a dataset.
#[async_trait]
pub trait CheckExecutor: Debug + Send + Sync {
    /// Executes every check of the battery, in order.
    ///
    /// A checker failing on its column yields an outcome carrying the error
    /// message. A battery entry without a registered implementation is
    /// fatal.
    async fn execute(
        &self,
        dataset: &dyn Dataset,
        battery: &Battery,
        registry: &RuleRegistry,
    ) -> Result<Vec<CheckOutcome>>;
}

/// Executes checks by reading columns through DataFusion.
///
/// Every column is queried once per run and shared by all checks on it.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::DataFusionExecutor;
///
/// let executor = DataFusionExecutor::new()
///     .with_table_name("customers")
///     .with_sample_size(5);
/// assert_eq!(executor.sample_size(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct DataFusionExecutor {
    table_name: String,
    sample_size: usize,
    log_config: LogConfig,
}

impl Default for DataFusionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFusionExecutor {
    /// Creates an executor registering datasets as `smell_data`.
    pub fn new() -> Self {
        Self {
            table_name: "smell_data".to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            log_config: LogConfig::default(),
        }
    }

    /// Sets the table name the dataset is registered under.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Sets how many faulty values are kept per check.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the logging configuration.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Number of faulty values kept per check.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    async fn load_column(
        &self,
        ctx: &SessionContext,
        dataset: &dyn Dataset,
        table: &str,
        column: &str,
    ) -> Result<Vec<CellValue>> {
        if dataset.schema().field_with_name(column).is_err() {
            return Err(SmellError::ColumnNotFound {
                column: column.to_string(),
            });
        }
        let sql = format!(
            "SELECT {} FROM {table}",
            SqlSecurity::escape_identifier(column)
        );
        let start = Instant::now();
        let batches = ctx.sql(&sql).await?.collect().await?;

        let mut values = Vec::new();
        for batch in &batches {
            values.extend(array_to_values(batch.column(0))?);
        }
        log_data_op!(
            self.log_config,
            column.name = %column,
            column.rows = values.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded column"
        );
        Ok(values)
    }

    fn run_check(&self, checker: &dyn Checker, spec: &CheckSpec, values: &[CellValue]) -> CheckOutcome {
        let resolved = Parameters::resolve(&checker.default_parameters(), &spec.parameters);
        let evaluation = checker
            .validate_parameters(&spec.parameters)
            .and_then(|_| resolved.mostly())
            .and_then(|mostly| Ok((mostly, checker.evaluate(values, &resolved)?)))
            .and_then(|(mostly, verdicts)| {
                if verdicts.len() == values.len() {
                    Ok((mostly, verdicts))
                } else {
                    Err(SmellError::Internal(format!(
                        "checker returned {} verdicts for {} rows",
                        verdicts.len(),
                        values.len()
                    )))
                }
            });

        match evaluation {
            Ok((mostly, verdicts)) => {
                let outcome = CheckOutcome::from_verdicts(
                    spec.clone(),
                    resolved.into_map(),
                    values,
                    &verdicts,
                    mostly,
                    self.sample_size,
                );
                log_check!(
                    self.log_config,
                    column.name = %spec.column,
                    checker.id = %spec.checker_id,
                    check.success = outcome.success,
                    check.unexpected = outcome.unexpected_count,
                    check.elements = outcome.element_count,
                    "Evaluated check"
                );
                outcome
            }
            Err(e) => {
                let error =
                    SmellError::check_evaluation(spec.checker_id.as_str(), spec.column.as_str(), e.to_string());
                warn!(
                    column.name = %spec.column,
                    checker.id = %spec.checker_id,
                    error = %truncate_field(&e.to_string(), self.log_config.max_field_length),
                    "Check raised an error"
                );
                CheckOutcome::from_exception(
                    spec.clone(),
                    resolved.into_map(),
                    values.len(),
                    error.to_string(),
                )
            }
        }
    }
}

#[async_trait]
impl CheckExecutor for DataFusionExecutor {
    #[instrument(skip_all, fields(dataset.name = %dataset.name(), battery.size = battery.len()))]
    async fn execute(
        &self,
        dataset: &dyn Dataset,
        battery: &Battery,
        registry: &RuleRegistry,
    ) -> Result<Vec<CheckOutcome>> {
        if battery.is_empty() {
            debug!("Empty battery, nothing to execute");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        // unquoted so registration and query apply the same case folding
        SqlSecurity::validate_table_name(&self.table_name)?;
        let table = self.table_name.as_str();
        let ctx = SessionContext::new();
        dataset.register(&ctx, &self.table_name).await?;

        // a column that cannot be converted invalidates its checks only
        let mut columns: HashMap<&str, std::result::Result<Vec<CellValue>, String>> =
            HashMap::new();
        let mut outcomes = Vec::with_capacity(battery.len());
        for spec in battery.iter() {
            let checker = registry.require_checker(&spec.checker_id)?;
            if !columns.contains_key(spec.column.as_str()) {
                let loaded = match self.load_column(&ctx, dataset, table, &spec.column).await {
                    Ok(values) => Ok(values),
                    Err(e @ SmellError::TypeMismatch { .. }) => {
                        warn!(
                            column.name = %spec.column,
                            error = %truncate_field(&e.to_string(), self.log_config.max_field_length),
                            "Column could not be converted"
                        );
                        Err(e.to_string())
                    }
                    Err(e) => return Err(e),
                };
                columns.insert(spec.column.as_str(), loaded);
            }
            let outcome = match columns.get(spec.column.as_str()) {
                Some(Ok(values)) => self.run_check(checker.as_ref(), spec, values),
                Some(Err(message)) => CheckOutcome::from_exception(
                    spec.clone(),
                    Parameters::resolve(&checker.default_parameters(), &spec.parameters)
                        .into_map(),
                    0,
                    SmellError::check_evaluation(
                        spec.checker_id.as_str(),
                        spec.column.as_str(),
                        message.as_str(),
                    )
                    .to_string(),
                ),
                None => self.run_check(checker.as_ref(), spec, &[]),
            };
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.success).count();
        perf_debug!(
            self.log_config,
            checks.total = outcomes.len(),
            checks.failed = failed,
            columns.loaded = columns.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Executed battery"
        );
        Ok(outcomes)
    }
}

/// Converts an Arrow array into cell values.
///
/// Integers and floats keep their numeric form, decimals become floats and
/// every other type is rendered as text.
pub fn array_to_values(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let data_type = array.data_type();
    let values = match data_type {
        DataType::Null => vec![CellValue::Null; array.len()],
        DataType::Boolean => array.as_boolean().iter().map(CellValue::from).collect(),
        DataType::UInt64 => array
            .as_primitive::<UInt64Type>()
            .iter()
            .map(|value| match value {
                Some(v) => i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer),
                None => CellValue::Null,
            })
            .collect(),
        dt if dt.is_integer() => cast(array, &DataType::Int64)?
            .as_primitive::<Int64Type>()
            .iter()
            .map(CellValue::from)
            .collect(),
        dt if dt.is_floating() || matches!(dt, DataType::Decimal128(_, _) | DataType::Decimal256(_, _)) => {
            cast(array, &DataType::Float64)?
                .as_primitive::<Float64Type>()
                .iter()
                .map(CellValue::from)
                .collect()
        }
        DataType::Binary => lossy_text(array.as_binary::<i32>().iter()),
        DataType::LargeBinary => lossy_text(array.as_binary::<i64>().iter()),
        DataType::BinaryView => lossy_text(array.as_binary_view().iter()),
        DataType::FixedSizeBinary(_) => lossy_text(array.as_fixed_size_binary().iter()),
        _ => {
            // unsafe cast: a value that cannot be rendered must not turn into a null
            let options = CastOptions {
                safe: false,
                ..Default::default()
            };
            cast_with_options(array, &DataType::Utf8, &options)
                .map_err(|e| {
                    SmellError::type_mismatch(
                        "a type convertible to text",
                        format!("{data_type} ({e})"),
                    )
                })?
                .as_string::<i32>()
                .iter()
                .map(CellValue::from)
                .collect()
        }
    };
    Ok(values)
}

/// Renders byte values as text, replacing invalid UTF-8 sequences.
fn lossy_text<'a>(bytes: impl Iterator<Item = Option<&'a [u8]>>) -> Vec<CellValue> {
    bytes
        .map(|value| value.map(|b| String::from_utf8_lossy(b).into_owned()).into())
        .collect()
}
