//! Extreme value smell based on z-scores.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::stats::mean_and_m2;
use super::{numeric_values, CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde_json::json;
use std::collections::BTreeSet;

const THRESHOLD: &str = "threshold";
const DOUBLE_SIDED: &str = "double_sided";

/// Flags numbers whose absolute z-score reaches `threshold` (default 3).
///
/// Each value is scored against the mean and sample standard deviation of
/// the *other* values of the column. Scoring against statistics that
/// include the value itself bounds the z-score by `(n - 1) / sqrt(n)`, so a
/// single outlier in a small column could never reach the threshold.
///
/// Values with fewer than two other values to compare against are never
/// flagged. When the other values are all equal, any different value is
/// flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtremeValueChecker;

impl ExtremeValueChecker {
    /// Leave-one-out z-scores, `None` where a value has no score.
    pub fn z_scores(values: &[Option<f64>]) -> Vec<Option<f64>> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let n = present.len();
        if n < 3 {
            return vec![None; values.len()];
        }
        // z-scores are scale free; scaling keeps squared deviations finite
        let magnitude = present.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let unit = if magnitude.is_finite() && magnitude > 0.0 {
            magnitude
        } else {
            1.0
        };
        let scaled: Vec<f64> = present.iter().map(|v| v / unit).collect();
        let (mean, m2) = mean_and_m2(&scaled);
        let others = (n - 1) as f64;

        values
            .iter()
            .map(|value| {
                let x = (*value)? / unit;
                let delta = x - mean;
                let mean_others = mean - delta / others;
                let m2_others = m2 - delta * delta * n as f64 / others;
                if !m2_others.is_finite() {
                    return None;
                }
                let m2_others = m2_others.max(0.0);
                let std_others = (m2_others / (others - 1.0)).sqrt();
                let deviation = x - mean_others;

                // relative tolerance for float noise in the removal update
                let scale = mean_others.abs().max(1.0);
                if std_others <= f64::EPSILON * scale {
                    if deviation.abs() <= 1e-9 * scale {
                        Some(0.0)
                    } else {
                        Some(f64::INFINITY.copysign(deviation))
                    }
                } else {
                    Some(deviation / std_others)
                }
            })
            .collect()
    }
}

impl Checker for ExtremeValueChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("extreme_value_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::ExtremeValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::Int, ColumnType::Float, ColumnType::Numeric])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([
            (THRESHOLD, json!(3)),
            (DOUBLE_SIDED, json!(true)),
            (MOSTLY, json!(1.0)),
        ])
    }

    fn immutable_parameters(&self) -> &'static [&'static str] {
        &[DOUBLE_SIDED]
    }

    fn validate_resolved(&self, params: &Parameters) -> Result<()> {
        params.positive_f64(THRESHOLD).map(|_| ())
    }

    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts> {
        let threshold = params.positive_f64(THRESHOLD)?;
        let numbers = numeric_values(self.id().as_str(), values)?;
        let scores = Self::z_scores(&numbers);

        Ok(numbers
            .iter()
            .zip(scores)
            .map(|(number, score)| match (number, score) {
                (None, _) => None,
                (Some(_), None) => Some(true),
                (Some(_), Some(z)) => Some(z.abs() < threshold),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{faulty, run};
    use super::*;

    fn ints(values: &[i64]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Integer(*v)).collect()
    }

    #[test]
    fn test_single_outlier_in_small_column() {
        let values = ints(&[-300, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert_eq!(faulty(&verdicts), vec![0]);
    }

    #[test]
    fn test_scores_match_manual_computation() {
        let numbers: Vec<Option<f64>> = [-300.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
            .into_iter()
            .map(Some)
            .collect();
        let scores = ExtremeValueChecker::z_scores(&numbers);

        // others of -300 are 1..=9: mean 5, sample std sqrt(7.5)
        let expected = (-300.0 - 5.0) / 7.5f64.sqrt();
        assert!((scores[0].unwrap() - expected).abs() < 1e-9);
        assert!(scores[1..].iter().all(|z| z.unwrap().abs() < 1.0));
    }

    #[test]
    fn test_uniform_column_is_clean() {
        let values = ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert!(faulty(&verdicts).is_empty());
    }

    #[test]
    fn test_constant_others() {
        let values = ints(&[5, 5, 5, 5, 6]);
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert_eq!(faulty(&verdicts), vec![4]);

        let constant = ints(&[7, 7, 7]);
        let verdicts = run(&ExtremeValueChecker, &constant, ParameterOverrides::new());
        assert!(faulty(&verdicts).is_empty());
    }

    #[test]
    fn test_huge_magnitudes_keep_their_scores() {
        let values: Vec<CellValue> = [1e200, 1e200, 1e200, 1e200, 2e200, 1e200]
            .into_iter()
            .map(CellValue::Float)
            .collect();
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert_eq!(faulty(&verdicts), vec![4]);

        let values: Vec<CellValue> = [1e300, 2e300, 3e300, 4e300, 5e300, 6e300]
            .into_iter()
            .map(CellValue::Float)
            .collect();
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert!(faulty(&verdicts).is_empty());
    }

    #[test]
    fn test_short_columns_and_nulls() {
        let values = vec![CellValue::Integer(1), CellValue::Null, CellValue::Integer(1000)];
        let verdicts = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        assert_eq!(verdicts, vec![Some(true), None, Some(true)]);
    }

    #[test]
    fn test_lower_threshold_flags_more() {
        let values = ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 30]);
        let strict = run(&ExtremeValueChecker, &values, ParameterOverrides::new());
        let loose = run(
            &ExtremeValueChecker,
            &values,
            parameters::overrides([(THRESHOLD, json!(1.5))]),
        );
        assert!(faulty(&loose).len() >= faulty(&strict).len());
        assert!(faulty(&loose).contains(&9));
    }

    #[test]
    fn test_parameter_validation() {
        let zero = parameters::overrides([(THRESHOLD, json!(0))]);
        assert!(ExtremeValueChecker.validate_parameters(&zero).is_err());

        let one_sided = parameters::overrides([(DOUBLE_SIDED, json!(false))]);
        let err = ExtremeValueChecker
            .validate_parameters(&one_sided)
            .unwrap_err();
        assert!(err.to_string().contains("cannot be altered"));
    }
}
