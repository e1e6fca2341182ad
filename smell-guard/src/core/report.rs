//! Detection reports: results plus run metadata.

use crate::checkers::CheckerId;
use crate::core::{CheckOutcome, ColumnType, ExtendedDetectionResult};
use crate::prelude::*;
use crate::smells::SmellKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Counters of a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionMetrics {
    /// Checks in the battery
    pub total_checks: usize,
    /// Checks that met their `mostly` threshold
    pub passed_checks: usize,
    /// Checks that produced a detection result
    pub failed_checks: usize,
    /// Checks whose checker failed to run
    pub invalid_checks: usize,
    /// Wall clock duration of the run in milliseconds
    pub execution_time_ms: u64,
}

impl DetectionMetrics {
    /// Counts outcomes.
    pub fn from_outcomes(outcomes: &[CheckOutcome], execution_time_ms: u64) -> Self {
        let invalid_checks = outcomes.iter().filter(|o| o.is_invalid()).count();
        let passed_checks = outcomes.iter().filter(|o| o.success).count();
        Self {
            total_checks: outcomes.len(),
            passed_checks,
            failed_checks: outcomes.len() - passed_checks - invalid_checks,
            invalid_checks,
            execution_time_ms,
        }
    }

    /// Share of checks that passed, as a percentage. 100 without checks.
    pub fn success_rate(&self) -> f64 {
        if self.total_checks == 0 {
            100.0
        } else {
            (self.passed_checks as f64 / self.total_checks as f64) * 100.0
        }
    }
}

/// A check whose checker failed to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidCheck {
    /// The column the check targeted
    pub column: String,
    /// The checker that failed
    pub checker_id: CheckerId,
    /// The error message
    pub message: String,
}

impl InvalidCheck {
    fn from_outcome(outcome: &CheckOutcome) -> Option<Self> {
        outcome.exception.as_ref().map(|message| Self {
            column: outcome.spec.column.clone(),
            checker_id: outcome.spec.checker_id.clone(),
            message: message.clone(),
        })
    }
}

/// Everything a detection run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Name of the inspected dataset
    pub dataset_name: String,
    /// When the run finished (RFC 3339)
    pub timestamp: String,
    /// Classified type of every profiled column
    pub column_types: BTreeMap<String, ColumnType>,
    /// Detected smells in battery order
    pub results: Vec<ExtendedDetectionResult>,
    /// Checks whose checker failed to run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_checks: Vec<InvalidCheck>,
    /// Run counters
    pub metrics: DetectionMetrics,
}

impl DetectionReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        dataset_name: impl Into<String>,
        column_types: BTreeMap<String, ColumnType>,
        results: Vec<ExtendedDetectionResult>,
        outcomes: &[CheckOutcome],
        execution_time_ms: u64,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            column_types,
            results,
            invalid_checks: outcomes
                .iter()
                .filter_map(InvalidCheck::from_outcome)
                .collect(),
            metrics: DetectionMetrics::from_outcomes(outcomes, execution_time_ms),
        }
    }

    /// Returns true if at least one smell was detected.
    pub fn has_smells(&self) -> bool {
        !self.results.is_empty()
    }

    /// Groups results by column name.
    pub fn results_by_column(&self) -> BTreeMap<&str, Vec<&ExtendedDetectionResult>> {
        let mut grouped: BTreeMap<&str, Vec<&ExtendedDetectionResult>> = BTreeMap::new();
        for result in &self.results {
            grouped
                .entry(result.column_name.as_str())
                .or_default()
                .push(result);
        }
        grouped
    }

    /// The distinct smell kinds detected.
    pub fn detected_smell_kinds(&self) -> BTreeSet<SmellKind> {
        self.results.iter().map(|r| r.data_smell_type).collect()
    }

    /// Serializes the report as pretty printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
