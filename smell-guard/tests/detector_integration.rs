//! End-to-end detection runs through the public API.

mod common;

use common::{dataset, floats, ints, outlier_ints, texts};
use serde_json::json;
use smell_guard::checkers::{
    parameters, CellValue, Checker, CheckerId, ParameterOverrides, Parameters, RowVerdicts,
};
use smell_guard::core::{default_registry, ColumnType, RuleRegistry};
use smell_guard::formatters::{FormatterConfig, HumanFormatter, ReportFormatter};
use smell_guard::prelude::*;
use smell_guard::sources::{CsvDatasetManager, DatasetManager};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Flags a sentinel standing in for a missing integer.
#[derive(Debug)]
struct SentinelChecker {
    sentinel: i64,
}

impl Checker for SentinelChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("dummy_value_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::DummyValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::Int])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([("mostly", json!(0.95))])
    }

    fn evaluate(&self, values: &[CellValue], _params: &Parameters) -> Result<RowVerdicts> {
        Ok(values
            .iter()
            .map(|value| match value {
                CellValue::Integer(v) => Some(*v != self.sentinel),
                _ => None,
            })
            .collect())
    }
}

/// Fails on every column.
#[derive(Debug)]
struct BrokenChecker;

impl Checker for BrokenChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("broken_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::AmbiguousValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::Int])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([("mostly", json!(1.0))])
    }

    fn evaluate(&self, _values: &[CellValue], _params: &Parameters) -> Result<RowVerdicts> {
        Err(SmellError::Internal("rule is broken".to_string()))
    }
}

fn orders() -> Arc<dyn Dataset> {
    Arc::new(dataset(
        "orders",
        vec![
            ("amount", ints(outlier_ints())),
            ("discount", floats(vec![0.5; 10])),
            ("city", texts(vec![
                "Berlin", "Hamburg", "Munich", "Cologne", "Frankfurt", "Stuttgart", "Dresden",
                "Leipzig", "Bremen", "Hanover",
            ])),
        ],
    ))
}

#[tokio::test]
async fn test_extreme_and_sign_on_integer_column() {
    let detector = SmellDetector::builder(orders())
        .configuration(
            DetectionConfiguration::builder()
                .column_names(["amount"])
                .smell(SmellKind::ExtremeValue)
                .smell(SmellKind::SuspectSign)
                .build(),
        )
        .build()
        .unwrap();

    let results = detector.detect().await.unwrap();
    let kinds: BTreeSet<_> = results.iter().map(|r| r.data_smell_type).collect();
    assert_eq!(
        kinds,
        BTreeSet::from([SmellKind::ExtremeValue, SmellKind::SuspectSign])
    );
    for result in &results {
        assert_eq!(result.column_name, "amount");
        assert_eq!(result.column_type, ColumnType::Int);
        assert_eq!(result.statistics.total_element_count, 10);
        assert_eq!(result.statistics.faulty_element_count, 1);
        assert_eq!(result.faulty_elements, vec![CellValue::Integer(-300)]);
        assert_eq!(result.parameters["column"], json!("amount"));
    }
}

#[tokio::test]
async fn test_clean_columns_produce_no_results() {
    let detector = SmellDetector::builder(orders())
        .configuration(
            DetectionConfiguration::builder()
                .column_names(["discount", "city"])
                .build(),
        )
        .build()
        .unwrap();

    let report = detector.detect_report().await.unwrap();
    assert!(!report.has_smells());
    // discount: 4 checks, city: 6 checks
    assert_eq!(report.metrics.total_checks, 10);
    assert_eq!(report.metrics.passed_checks, 10);
}

#[tokio::test]
async fn test_blank_and_long_column_names() {
    let long_name = "c".repeat(200);
    let data: Arc<dyn Dataset> = Arc::new(dataset(
        "headers",
        vec![(" ", ints(outlier_ints())), (long_name.as_str(), ints(outlier_ints()))],
    ));
    let detector = SmellDetector::builder(data)
        .configuration(
            DetectionConfiguration::builder()
                .smell(SmellKind::ExtremeValue)
                .build(),
        )
        .build()
        .unwrap();

    let results = detector.detect().await.unwrap();
    let columns: BTreeSet<&str> = results.iter().map(|r| r.column_name.as_str()).collect();
    assert_eq!(columns, BTreeSet::from([" ", long_name.as_str()]));
    assert!(results
        .iter()
        .all(|r| r.faulty_elements == vec![CellValue::Integer(-300)]));
}

#[test]
fn test_invalid_overrides_are_rejected_at_build_time() {
    let config = DetectionConfiguration::builder()
        .smell_with(SmellKind::IntegerAsFloatingPointNumber, [("epsilon", json!(0))])
        .build();
    let err = SmellDetector::builder(orders())
        .configuration(config)
        .build()
        .unwrap_err();
    assert!(err.is_configuration());

    let config = DetectionConfiguration::builder()
        .smell_with(SmellKind::ExtremeValue, [("no_such_parameter", json!(1))])
        .build();
    assert!(SmellDetector::builder(orders())
        .configuration(config)
        .build()
        .is_err());
}

#[tokio::test]
async fn test_empty_registry_detects_nothing() {
    let detector = SmellDetector::builder(orders())
        .registry(Arc::new(RuleRegistry::new()))
        .build()
        .unwrap();

    assert!(detector.supported_smell_kinds().is_empty());
    let report = detector.detect_report().await.unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.metrics.total_checks, 0);
}

#[tokio::test]
async fn test_unknown_column_restriction_detects_nothing() {
    let detector = SmellDetector::builder(orders())
        .configuration(
            DetectionConfiguration::builder()
                .column_names(["does_not_exist"])
                .build(),
        )
        .build()
        .unwrap();

    let report = detector.detect_report().await.unwrap();
    assert!(report.results.is_empty());
    assert!(report.column_types.is_empty());
}

#[tokio::test]
async fn test_custom_checker_joins_the_pipeline() {
    let mut registry = default_registry();
    registry.register_checker(Arc::new(SentinelChecker { sentinel: -999 }));

    let data: Arc<dyn Dataset> = Arc::new(dataset(
        "sentinels",
        vec![("quantity", ints(vec![3, 5, -999, 4, 6, 5, 3, 4, 6, 5]))],
    ));
    let detector = SmellDetector::builder(data)
        .registry(Arc::new(registry))
        .configuration(
            DetectionConfiguration::builder()
                .smell(SmellKind::DummyValue)
                .build(),
        )
        .build()
        .unwrap();

    assert!(detector
        .supported_smell_kinds()
        .contains(&SmellKind::DummyValue));
    let results = detector.detect().await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].data_smell_type, SmellKind::DummyValue);
    assert_eq!(results[0].faulty_elements, vec![CellValue::Integer(-999)]);
}

#[tokio::test]
async fn test_failing_checker_is_reported_as_invalid() {
    let mut registry = RuleRegistry::new();
    registry.register_checker(Arc::new(BrokenChecker));

    let detector = SmellDetector::builder(orders())
        .registry(Arc::new(registry))
        .build()
        .unwrap();

    let report = detector.detect_report().await.unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.metrics.invalid_checks, 1);
    assert_eq!(report.invalid_checks.len(), 1);
    assert_eq!(report.invalid_checks[0].column, "amount");
    assert!(report.invalid_checks[0].message.contains("rule is broken"));
}

#[tokio::test]
async fn test_human_report_of_a_detection_run() {
    let detector = SmellDetector::builder(orders())
        .configuration(
            DetectionConfiguration::builder()
                .column_names(["amount"])
                .smell(SmellKind::ExtremeValue)
                .build(),
        )
        .build()
        .unwrap();

    let report = detector.detect_report().await.unwrap();
    let output = HumanFormatter::with_config(FormatterConfig::default().with_colors(false))
        .format(&report)
        .unwrap();
    assert!(output.contains("1 data smells detected"));
    assert!(output.contains("Dataset: orders"));
    assert!(output.contains("Extreme Value Smell in 'amount' (INT)"));
    assert!(output.contains("Values: -300"));
}

#[tokio::test]
async fn test_missing_values_in_csv_dataset() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("payments.csv"),
        "id,amount\n1,10\n2,\n3,30\n4,40\n5,50\n",
    )
    .unwrap();

    let manager = CsvDatasetManager::new(dir.path()).unwrap();
    let data = manager.get_dataset("payments").await.unwrap();
    let detector = SmellDetector::builder(data)
        .configuration(
            DetectionConfiguration::builder()
                .smell(SmellKind::MissingValue)
                .build(),
        )
        .build()
        .unwrap();

    let results = detector.detect().await.unwrap();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.column_name, "amount");
    assert_eq!(result.column_type, ColumnType::Int);
    assert_eq!(result.statistics.total_element_count, 5);
    assert_eq!(result.statistics.faulty_element_count, 1);
    assert_eq!(result.faulty_elements, vec![CellValue::Null]);
}
