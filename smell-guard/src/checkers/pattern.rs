//! Regex based checkers.
//!
//! A row is faulty when it *matches* the smell pattern. The pattern is found
//! anywhere in the rendered value; anchors in the pattern decide whether the
//! whole value has to match.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::{CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeSet;

const REGEX: &str = "regex";
const LENGTH_THRESHOLD: &str = "length_threshold";

/// Flags values matching a fixed regular expression.
///
/// The pattern is part of the rule and cannot be overridden. It is still
/// reported among the resolved parameters of every check.
#[derive(Debug, Clone)]
pub struct PatternChecker {
    id: &'static str,
    smell_kind: SmellKind,
    regex: Regex,
}

impl PatternChecker {
    /// Integers stored as text, e.g. `"-30"`.
    #[allow(clippy::expect_used)]
    pub fn integer_as_string() -> Self {
        Self {
            id: "integer_as_string_smell",
            smell_kind: SmellKind::IntegerAsString,
            regex: Regex::new(r"^(?:\+|-)?\d+$")
                .expect("Hard-coded regex pattern should be valid"),
        }
    }

    /// Floating point numbers stored as text, e.g. `"-2.2"` or `"3."`.
    #[allow(clippy::expect_used)]
    pub fn float_as_string() -> Self {
        Self {
            id: "float_as_string_smell",
            smell_kind: SmellKind::FloatingPointNumberAsString,
            regex: Regex::new(r"^(?:\+|-)?\d+\.\d*$")
                .expect("Hard-coded regex pattern should be valid"),
        }
    }

    /// The pattern that marks a faulty value.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Checker for PatternChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new(self.id)
    }

    fn smell_kind(&self) -> SmellKind {
        self.smell_kind
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::String])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(REGEX, json!(self.pattern())), (MOSTLY, json!(0.1))])
    }

    fn immutable_parameters(&self) -> &'static [&'static str] {
        &[REGEX]
    }

    fn evaluate(&self, values: &[CellValue], _params: &Parameters) -> Result<RowVerdicts> {
        Ok(match_rows(&self.regex, values))
    }
}

/// Flags text containing a word of at least `length_threshold` (default 30)
/// word characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongDataValueChecker;

impl LongDataValueChecker {
    fn regex(length_threshold: usize) -> Result<Regex> {
        Regex::new(&format!(r"\w{{{length_threshold},}}")).map_err(|e| {
            SmellError::configuration(format!(
                "'{LENGTH_THRESHOLD}' of {length_threshold} is not usable: {e}"
            ))
        })
    }
}

impl Checker for LongDataValueChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("long_data_value_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::LongDataValue
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::String])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(LENGTH_THRESHOLD, json!(30)), (MOSTLY, json!(0.95))])
    }

    fn validate_resolved(&self, params: &Parameters) -> Result<()> {
        Self::regex(params.positive_usize(LENGTH_THRESHOLD)?).map(|_| ())
    }

    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts> {
        let regex = Self::regex(params.positive_usize(LENGTH_THRESHOLD)?)?;
        Ok(match_rows(&regex, values))
    }
}

fn match_rows(regex: &Regex, values: &[CellValue]) -> RowVerdicts {
    values
        .iter()
        .map(|value| {
            if value.is_null() {
                None
            } else {
                value.as_text().map(|text| !regex.is_match(&text))
            }
        })
        .collect()
}
