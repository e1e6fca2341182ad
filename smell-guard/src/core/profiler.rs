//! Expansion of a dataset's columns into a battery of checks.

use crate::checkers::{parameters::COLUMN, CheckerId, ParameterOverrides};
use crate::core::{
    default_registry, ColumnType, ColumnTypeClassifier, Dataset, DetectionConfiguration,
    RuleRegistry, SchemaTypeClassifier,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One check to execute: a checker applied to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSpec {
    /// The column to check
    pub column: String,
    /// The checker to run
    pub checker_id: CheckerId,
    /// Parameter overrides, always including the column
    pub parameters: ParameterOverrides,
}

impl CheckSpec {
    /// Creates a check, recording the column among its parameters.
    pub fn new(
        column: impl Into<String>,
        checker_id: impl Into<CheckerId>,
        overrides: &ParameterOverrides,
    ) -> Self {
        let column = column.into();
        let mut parameters = overrides.clone();
        parameters.insert(COLUMN.to_string(), Value::String(column.clone()));
        Self {
            column,
            checker_id: checker_id.into(),
            parameters,
        }
    }
}

/// The checks selected for one dataset, plus the column types that
/// selected them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    /// Checks in execution order
    pub checks: Vec<CheckSpec>,
    /// Classified type of every profiled column
    pub column_types: BTreeMap<String, ColumnType>,
}

impl Battery {
    /// Number of checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if there is nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Iterates over the checks.
    pub fn iter(&self) -> impl Iterator<Item = &CheckSpec> {
        self.checks.iter()
    }
}

/// Builds batteries from a registry and a configuration.
///
/// For every column that passes the column restriction the profiler looks up
/// the checks registered for the column's type and keeps those whose smell
/// kind is part of the resolved smell map. Entries are ordered by column
/// name, then smell kind.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::{
///     CheckerDescriptor, ColumnType, DetectionConfiguration, InMemoryDataset, Profiler,
///     RuleRegistry,
/// };
/// use smell_guard::smells::SmellKind;
/// use arrow::datatypes::{DataType, Field, Schema};
/// use std::sync::Arc;
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("age", DataType::Int64, true),
///     Field::new("name", DataType::Utf8, true),
/// ]));
/// let dataset = InMemoryDataset::empty("people", schema);
///
/// let mut registry = RuleRegistry::new();
/// registry.register(CheckerDescriptor::new(
///     SmellKind::ExtremeValue,
///     [ColumnType::Int],
///     "extreme_value_smell",
/// ));
/// let config = DetectionConfiguration::builder()
///     .registry(Arc::new(registry))
///     .build();
///
/// let battery = Profiler::new().profile(&dataset, &config).unwrap();
/// assert_eq!(battery.len(), 1);
/// assert_eq!(battery.checks[0].column, "age");
/// ```
#[derive(Debug, Clone)]
pub struct Profiler {
    classifier: Arc<dyn ColumnTypeClassifier>,
    registry: Arc<RuleRegistry>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// Creates a profiler using schema based classification and a fresh
    /// default registry as fallback.
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(SchemaTypeClassifier))
    }

    /// Creates a profiler with a custom column type classifier.
    pub fn with_classifier(classifier: Arc<dyn ColumnTypeClassifier>) -> Self {
        Self {
            classifier,
            registry: Arc::new(default_registry()),
        }
    }

    /// Replaces the registry used when a configuration carries none.
    pub fn with_registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The registry a configuration resolves to.
    pub fn resolve_registry<'a>(
        &'a self,
        configuration: &'a DetectionConfiguration,
    ) -> &'a RuleRegistry {
        configuration
            .registry
            .as_deref()
            .unwrap_or(self.registry.as_ref())
    }

    /// Builds the battery of checks for a dataset.
    #[instrument(skip(self, dataset, configuration), fields(dataset.name = %dataset.name()))]
    pub fn profile(
        &self,
        dataset: &dyn Dataset,
        configuration: &DetectionConfiguration,
    ) -> Result<Battery> {
        let registry = self.resolve_registry(configuration);
        let smells = configuration.resolve_smells(registry);
        let mut battery = Battery::default();

        for column in dataset.get_column_names() {
            if !configuration.includes_column(&column) {
                continue;
            }
            let column_type = self.classifier.classify(dataset, &column)?;
            let checks = registry.get_checks_for_type(column_type);

            let before = battery.len();
            for (smell_kind, checker_id) in checks {
                if let Some(overrides) = smells.get(smell_kind) {
                    battery
                        .checks
                        .push(CheckSpec::new(column.as_str(), checker_id.clone(), overrides));
                }
            }
            debug!(
                column.name = %column,
                column.type = %column_type,
                column.checks = battery.len() - before,
                "Profiled column"
            );
            battery.column_types.insert(column, column_type);
        }

        info!(
            battery.size = battery.len(),
            battery.columns = battery.column_types.len(),
            "Built check battery"
        );
        Ok(battery)
    }
}
