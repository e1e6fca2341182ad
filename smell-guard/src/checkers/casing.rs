//! Casing smell: values written all in one case, or with odd mixed case.

use super::parameters::{self, ParameterOverrides, Parameters, MOSTLY};
use super::{CellValue, Checker, CheckerId, RowVerdicts};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeSet;

const WORDCOUNT_THRESHOLD: &str = "same_case_wordcount_threshold";

#[allow(clippy::expect_used)]
static LEADING_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+").expect("Hard-coded regex pattern should be valid"));

// lower-then-upper ("cAsing") or upper, lower, upper again ("CaSing")
#[allow(clippy::expect_used)]
static MIXED_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+[a-z]+[A-Z]+.*|[a-z]+[A-Z]+.*)$")
        .expect("Hard-coded regex pattern should be valid")
});

/// Flags text values that are entirely lower or upper case once they have
/// enough words, and words with an unusual mix of cases.
///
/// Parameters: `same_case_wordcount_threshold` (default 2) and `mostly`
/// (default 1.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct CasingChecker;

impl CasingChecker {
    /// Returns true if `text` shows a casing smell.
    pub fn has_casing_smell(text: &str, wordcount_threshold: usize) -> bool {
        let words: Vec<&str> = text
            .split_whitespace()
            .filter_map(|token| LEADING_WORD.find(token).map(|m| m.as_str()))
            .collect();

        let same_case = words.len() >= wordcount_threshold
            && (words.iter().all(|w| *w == w.to_lowercase())
                || words.iter().all(|w| *w == w.to_uppercase()));

        same_case || words.iter().any(|w| MIXED_CASE.is_match(w))
    }
}

impl Checker for CasingChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("casing_smell")
    }

    fn smell_kind(&self) -> SmellKind {
        SmellKind::Casing
    }

    fn applicable_types(&self) -> BTreeSet<ColumnType> {
        BTreeSet::from([ColumnType::String])
    }

    fn default_parameters(&self) -> ParameterOverrides {
        parameters::overrides([(WORDCOUNT_THRESHOLD, json!(2)), (MOSTLY, json!(1.0))])
    }

    fn validate_resolved(&self, params: &Parameters) -> Result<()> {
        params.positive_usize(WORDCOUNT_THRESHOLD).map(|_| ())
    }

    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts> {
        let threshold = params.positive_usize(WORDCOUNT_THRESHOLD)?;
        values
            .iter()
            .map(|value| match value {
                v if v.is_null() => Ok(None),
                CellValue::Text(text) => Ok(Some(!Self::has_casing_smell(text, threshold))),
                other => Err(SmellError::type_mismatch("text", other.type_name())),
            })
            .collect()
    }
}
