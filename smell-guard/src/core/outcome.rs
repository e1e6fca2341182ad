//! Raw check outcomes and normalized detection results.

use crate::checkers::{CellValue, CheckerId, ParameterOverrides, RowVerdicts};
use crate::core::{CheckSpec, ColumnType};
use crate::smells::SmellKind;
use serde::{Deserialize, Serialize};

/// Default number of faulty values kept per check.
pub const DEFAULT_SAMPLE_SIZE: usize = 20;

/// The raw result of executing one battery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// The executed battery entry
    pub spec: CheckSpec,
    /// Defaults merged with the entry's overrides
    pub resolved_parameters: ParameterOverrides,
    /// Whether the pass fraction reached `mostly`
    pub success: bool,
    /// Number of rows in the column, nulls included
    pub element_count: usize,
    /// Number of rows not evaluated by the checker
    pub missing_count: usize,
    /// Number of rows reported as faulty
    pub unexpected_count: usize,
    /// Faulty rows as a percentage of evaluated rows
    pub unexpected_percent: f64,
    /// The first faulty values, in row order
    pub partial_unexpected_list: Vec<CellValue>,
    /// Set when the checker failed instead of producing verdicts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl CheckOutcome {
    /// Aggregates per-row verdicts.
    ///
    /// `mostly` is the minimum fraction of evaluated rows that must pass. A
    /// column without evaluated rows passes.
    pub fn from_verdicts(
        spec: CheckSpec,
        resolved_parameters: ParameterOverrides,
        values: &[CellValue],
        verdicts: &RowVerdicts,
        mostly: f64,
        sample_size: usize,
    ) -> Self {
        let evaluated = verdicts.iter().filter(|v| v.is_some()).count();
        let unexpected_count = verdicts.iter().filter(|v| **v == Some(false)).count();
        let pass_fraction = if evaluated == 0 {
            1.0
        } else {
            (evaluated - unexpected_count) as f64 / evaluated as f64
        };
        let unexpected_percent = if evaluated == 0 {
            0.0
        } else {
            unexpected_count as f64 * 100.0 / evaluated as f64
        };
        let partial_unexpected_list = values
            .iter()
            .zip(verdicts)
            .filter(|(_, verdict)| **verdict == Some(false))
            .map(|(value, _)| value.clone())
            .take(sample_size)
            .collect();

        Self {
            spec,
            resolved_parameters,
            success: pass_fraction >= mostly,
            element_count: values.len(),
            missing_count: values.len() - evaluated,
            unexpected_count,
            unexpected_percent,
            partial_unexpected_list,
            exception: None,
        }
    }

    /// An outcome for a check whose checker failed.
    pub fn from_exception(
        spec: CheckSpec,
        resolved_parameters: ParameterOverrides,
        element_count: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            spec,
            resolved_parameters,
            success: false,
            element_count,
            missing_count: 0,
            unexpected_count: 0,
            unexpected_percent: 0.0,
            partial_unexpected_list: Vec::new(),
            exception: Some(message.into()),
        }
    }

    /// The checker that produced the outcome.
    pub fn checker_id(&self) -> &CheckerId {
        &self.spec.checker_id
    }

    /// Returns true if the checker failed to run.
    pub fn is_invalid(&self) -> bool {
        self.exception.is_some()
    }
}

/// Row counts of a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStatistics {
    /// Rows examined
    pub total_element_count: usize,
    /// Rows flagged, never more than the total
    pub faulty_element_count: usize,
}

impl DetectionStatistics {
    /// Creates statistics, capping the faulty count at the total.
    pub fn new(total_element_count: usize, faulty_element_count: usize) -> Self {
        Self {
            total_element_count,
            faulty_element_count: faulty_element_count.min(total_element_count),
        }
    }

    /// Share of faulty rows, 0 for an empty column.
    pub fn faulty_ratio(&self) -> f64 {
        if self.total_element_count == 0 {
            0.0
        } else {
            self.faulty_element_count as f64 / self.total_element_count as f64
        }
    }
}

/// A smell found in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// The affected column
    pub column_name: String,
    /// The detected smell
    pub data_smell_type: SmellKind,
    /// Row counts
    pub statistics: DetectionStatistics,
    /// A bounded sample of offending values
    pub faulty_elements: Vec<CellValue>,
}

/// A [`DetectionResult`] with the column type and the parameters of the
/// check that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedDetectionResult {
    /// The detection itself
    #[serde(flatten)]
    pub result: DetectionResult,
    /// The classified type of the column
    pub column_type: ColumnType,
    /// The battery entry's parameters
    pub parameters: ParameterOverrides,
}

impl std::ops::Deref for ExtendedDetectionResult {
    type Target = DetectionResult;

    fn deref(&self) -> &Self::Target {
        &self.result
    }
}
