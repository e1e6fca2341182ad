//! Missing value smell.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::{CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde_json::json;
use std::collections::BTreeSet;

/// Flags missing values (nulls and NaN). Applies to every column type.
///
/// Unlike the other checkers every row is evaluated, so the pass fraction
/// is taken over the whole column.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueChecker;

impl Checker for MissingValueChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("missing_value_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::MissingValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        ColumnType::ALL.into_iter().collect()
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(MOSTLY, json!(0.95))])
    }

    fn evaluate(&self, values: &[CellValue], _params: &Parameters) -> Result<RowVerdicts> {
        Ok(values.iter().map(|value| Some(!value.is_null())).collect())
    }
}
