//! Suspect sign smell.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::stats::quantile_sorted;
use super::{numeric_values, CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde_json::json;
use std::collections::BTreeSet;

const PERCENTILE_THRESHOLD: &str = "percentile_threshold";

/// The sign a column is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajoritySign {
    /// Negative values are suspect
    NonNegative,
    /// Positive values are suspect
    NonPositive,
    /// No sign dominates
    Mixed,
}

/// Flags values whose sign differs from the column's dominant sign.
///
/// With `p = percentile_threshold` (default 0.25) the quantiles at `p` and
/// `1 - p` are computed by linear interpolation. A non-negative lower
/// quantile makes negatives suspect, otherwise a non-positive upper quantile
/// makes positives suspect. Zero is never suspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspectSignChecker;

impl SuspectSignChecker {
    /// Determines the dominant sign of the present values.
    pub fn majority_sign(values: &[f64], percentile_threshold: f64) -> MajoritySign {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let lower = quantile_sorted(&sorted, percentile_threshold);
        let upper = quantile_sorted(&sorted, 1.0 - percentile_threshold);
        match (lower, upper) {
            (Some(lower), _) if lower >= 0.0 => MajoritySign::NonNegative,
            (_, Some(upper)) if upper <= 0.0 => MajoritySign::NonPositive,
            _ => MajoritySign::Mixed,
        }
    }
}

impl Checker for SuspectSignChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("suspect_sign_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::SuspectSign
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::Int, ColumnType::Float, ColumnType::Numeric])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(PERCENTILE_THRESHOLD, json!(0.25)), (MOSTLY, json!(0.95))])
    }

    fn validate_resolved(&self, params: &Parameters) -> Result<()> {
        params.fraction(PERCENTILE_THRESHOLD).map(|_| ())
    }

    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts> {
        let percentile = params.fraction(PERCENTILE_THRESHOLD)?;
        let numbers = numeric_values(self.id().as_str(), values)?;
        let present: Vec<f64> = numbers.iter().flatten().copied().collect();
        let sign = Self::majority_sign(&present, percentile);

        Ok(numbers
            .into_iter()
            .map(|number| {
                number.map(|x| match sign {
                    MajoritySign::NonNegative => x >= 0.0,
                    MajoritySign::NonPositive => x <= 0.0,
                    MajoritySign::Mixed => true,
                })
            })
            .collect())
    }
}
