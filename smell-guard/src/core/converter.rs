//! Conversion of raw check outcomes into detection results.

use crate::checkers::parameters::COLUMN;
use crate::core::{
    CheckOutcome, ColumnType, DetectionResult, DetectionStatistics, ExtendedDetectionResult,
    RuleRegistry,
};
use crate::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Turns check outcomes into detection results.
pub trait ResultConverter: Debug + Send + Sync {
    /// Converts the failed, valid outcomes into results.
    ///
    /// `column_types` holds the classified type of every profiled column.
    fn convert(
        &self,
        outcomes: &[CheckOutcome],
        column_types: &BTreeMap<String, ColumnType>,
    ) -> Result<Vec<ExtendedDetectionResult>>;
}

/// The standard converter.
///
/// Successful outcomes and outcomes of checkers that failed to run produce
/// no result. Every other outcome yields exactly one result, in input order.
/// A checker id unknown to the registry is reported as
/// [`SmellError::RegistryDesync`].
#[derive(Debug, Clone)]
pub struct StandardResultConverter {
    registry: Arc<RuleRegistry>,
}

impl StandardResultConverter {
    /// Creates a converter resolving checker ids through `registry`.
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    fn convert_one(
        &self,
        outcome: &CheckOutcome,
        column_types: &BTreeMap<String, ColumnType>,
    ) -> Result<ExtendedDetectionResult> {
        let checker_id = outcome.checker_id();
        let smell_kind = self.registry.smell_kind_of(checker_id).ok_or_else(|| {
            SmellError::registry_desync(checker_id.as_str(), "is not mapped to a smell kind")
        })?;

        let column_name = outcome
            .spec
            .parameters
            .get(COLUMN)
            .and_then(|value| value.as_str())
            .unwrap_or(&outcome.spec.column)
            .to_string();
        let column_type = column_types.get(&column_name).copied().ok_or_else(|| {
            SmellError::Internal(format!("column '{column_name}' was never classified"))
        })?;

        Ok(ExtendedDetectionResult {
            result: DetectionResult {
                column_name,
                data_smell_type: smell_kind,
                statistics: DetectionStatistics::new(
                    outcome.element_count,
                    outcome.unexpected_count,
                ),
                faulty_elements: outcome.partial_unexpected_list.clone(),
            },
            column_type,
            parameters: outcome.spec.parameters.clone(),
        })
    }
}

impl ResultConverter for StandardResultConverter {
    #[instrument(skip_all, fields(outcomes = outcomes.len()))]
    fn convert(
        &self,
        outcomes: &[CheckOutcome],
        column_types: &BTreeMap<String, ColumnType>,
    ) -> Result<Vec<ExtendedDetectionResult>> {
        let results = outcomes
            .iter()
            .filter(|outcome| !outcome.success && !outcome.is_invalid())
            .map(|outcome| self.convert_one(outcome, column_types))
            .collect::<Result<Vec<_>>>()?;
        debug!(results = results.len(), "Converted check outcomes");
        Ok(results)
    }
}

/// Outcomes whose checker failed to run.
pub fn invalid_outcomes(outcomes: &[CheckOutcome]) -> impl Iterator<Item = &CheckOutcome> {
    outcomes.iter().filter(|outcome| outcome.is_invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::CellValue;
    use crate::core::{default_registry, CheckSpec};
    use crate::smells::SmellKind;
    use serde_json::json;

    fn outcome(column: &str, checker_id: &str, success: bool) -> CheckOutcome {
        let spec = CheckSpec::new(column, checker_id, &Default::default());
        let values = vec![CellValue::Integer(-300), CellValue::Integer(1)];
        let verdicts = vec![Some(false), Some(true)];
        let mostly = if success { 0.5 } else { 1.0 };
        CheckOutcome::from_verdicts(spec, Default::default(), &values, &verdicts, mostly, 20)
    }

    fn column_types() -> BTreeMap<String, ColumnType> {
        BTreeMap::from([("int1".to_string(), ColumnType::Int)])
    }

    fn converter() -> StandardResultConverter {
        StandardResultConverter::new(Arc::new(default_registry()))
    }

    #[test]
    fn test_only_failed_outcomes_become_results() {
        let outcomes = vec![
            outcome("int1", "extreme_value_smell", false),
            outcome("int1", "missing_value_smell", true),
            outcome("int1", "suspect_sign_smell", false),
        ];
        let results = converter().convert(&outcomes, &column_types()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].data_smell_type, SmellKind::ExtremeValue);
        assert_eq!(results[1].data_smell_type, SmellKind::SuspectSign);
        for result in &results {
            assert_eq!(result.column_name, "int1");
            assert_eq!(result.column_type, ColumnType::Int);
            assert_eq!(result.statistics, DetectionStatistics::new(2, 1));
            assert_eq!(result.faulty_elements, vec![CellValue::Integer(-300)]);
            assert_eq!(result.parameters[COLUMN], json!("int1"));
        }
    }

    #[test]
    fn test_invalid_outcomes_are_skipped() {
        let spec = CheckSpec::new("int1", "extreme_value_smell", &Default::default());
        let outcomes = vec![CheckOutcome::from_exception(spec, Default::default(), 2, "boom")];
        assert!(converter().convert(&outcomes, &column_types()).unwrap().is_empty());
        assert_eq!(invalid_outcomes(&outcomes).count(), 1);
    }

    #[test]
    fn test_unknown_checker_is_a_desync() {
        let outcomes = vec![outcome("int1", "no_such_checker", false)];
        let err = converter().convert(&outcomes, &column_types()).unwrap_err();
        assert!(matches!(err, SmellError::RegistryDesync { .. }));
    }

    #[test]
    fn test_unclassified_column() {
        let outcomes = vec![outcome("other", "extreme_value_smell", false)];
        assert!(matches!(
            converter().convert(&outcomes, &column_types()),
            Err(SmellError::Internal(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(converter().convert(&[], &BTreeMap::new()).unwrap().is_empty());
    }
}
