//! Duplicated value smell.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::{CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};

/// Flags every occurrence of a value that appears more than once.
///
/// Two rows holding `8` are both faulty. Missing values are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatedValueChecker;

impl Checker for DuplicatedValueChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("duplicated_value_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::DuplicatedValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::String, ColumnType::Int])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(MOSTLY, json!(1.0))])
    }

    fn evaluate(&self, values: &[CellValue], _params: &Parameters) -> Result<RowVerdicts> {
        let mut counts = HashMap::with_capacity(values.len());
        for key in values.iter().filter_map(CellValue::key) {
            *counts.entry(key).or_insert(0usize) += 1;
        }

        Ok(values
            .iter()
            .map(|value| value.key().map(|key| counts.get(&key) == Some(&1)))
            .collect())
    }
}
