//! Integer encoded as floating point number.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::{numeric_values, CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde_json::json;
use std::collections::BTreeSet;

const EPSILON: &str = "epsilon";

/// Flags floats within `epsilon` (default 1e-6) of an integer.
///
/// The default `mostly` is 0.1: the column smells only when more than 90%
/// of its values look like integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerAsFloatChecker;

impl Checker for IntegerAsFloatChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("integer_as_float_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::IntegerAsFloatingPointNumber
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::Float])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(EPSILON, json!(1e-6)), (MOSTLY, json!(0.1))])
    }

    fn validate_resolved(&self, params: &Parameters) -> Result<()> {
        params.positive_f64(EPSILON).map(|_| ())
    }

    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts> {
        let epsilon = params.positive_f64(EPSILON)?;
        let numbers = numeric_values(self.id().as_str(), values)?;
        Ok(numbers
            .into_iter()
            .map(|number| number.map(|x| (x - x.round()).abs() > epsilon))
            .collect())
    }
}
