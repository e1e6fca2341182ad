//! Rule implementations, one per supported smell kind.
//!
//! A [`Checker`] is a pure function of a column's values and its resolved
//! parameters. It answers, per row, whether the row conforms. Rows a checker
//! does not look at (nulls, for all checkers except the missing value one)
//! are reported as `None` and do not count towards the pass fraction.
//!
//! | Checker | Smell | Column types |
//! |---------|-------|--------------|
//! | [`CasingChecker`] | `CASING_SMELL` | STRING |
//! | [`DuplicatedValueChecker`] | `DUPLICATED_VALUE_SMELL` | STRING, INT |
//! | [`ExtremeValueChecker`] | `EXTREME_VALUE_SMELL` | INT, FLOAT, NUMERIC |
//! | [`PatternChecker::float_as_string`] | `FLOATING_POINT_NUMBER_AS_STRING_SMELL` | STRING |
//! | [`IntegerAsFloatChecker`] | `INTEGER_AS_FLOATING_POINT_NUMBER_SMELL` | FLOAT |
//! | [`PatternChecker::integer_as_string`] | `INTEGER_AS_STRING_SMELL` | STRING |
//! | [`LongDataValueChecker`] | `LONG_DATA_VALUE_SMELL` | STRING |
//! | [`MissingValueChecker`] | `MISSING_VALUE_SMELL` | all |
//! | [`SuspectSignChecker`] | `SUSPECT_SIGN_SMELL` | INT, FLOAT, NUMERIC |

use crate::core::{CheckerDescriptor, ColumnType};
use crate::prelude::*;
use crate::smells::SmellKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use std::sync::Arc;

mod casing;
mod duplicated;
mod extreme_value;
mod integer_as_float;
mod missing;
pub mod parameters;
mod pattern;
pub(crate) mod stats;
mod suspect_sign;
mod value;

pub use casing::CasingChecker;
pub use duplicated::DuplicatedValueChecker;
pub use extreme_value::ExtremeValueChecker;
pub use integer_as_float::IntegerAsFloatChecker;
pub use missing::MissingValueChecker;
pub use parameters::{ParameterOverrides, Parameters};
pub use pattern::{LongDataValueChecker, PatternChecker};
pub use suspect_sign::SuspectSignChecker;
pub use value::{CellValue, ValueKey};

/// Identifies a checker implementation inside a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckerId(String);

impl CheckerId {
    /// Creates a checker id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CheckerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-row verdicts of a checker: `Some(true)` conforms, `Some(false)` is
/// faulty, `None` was not evaluated.
pub type RowVerdicts = Vec<Option<bool>>;

/// A detection rule for one smell kind.
///
/// # Examples
///
/// ```rust
/// use smell_guard::checkers::{Checker, CasingChecker, CellValue, Parameters};
///
/// let checker = CasingChecker;
/// let params = Parameters::resolve(&checker.default_parameters(), &Default::default());
/// let verdicts = checker
///     .evaluate(&[CellValue::from("abc def"), CellValue::from("Abc Def")], &params)
///     .unwrap();
/// assert_eq!(verdicts, vec![Some(false), Some(true)]);
/// ```
pub trait Checker: Debug + Send + Sync {
    /// The id this checker is registered under.
    fn id(&self) -> CheckerId;

    /// The smell kind the checker detects.
    fn smell_kind(&self) -> SmellKind;

    /// The column types the checker applies to.
    fn applicable_types(&self) -> BTreeSet<ColumnType>;

    /// Registration data of the checker.
    fn descriptor(&self) -> CheckerDescriptor {
        CheckerDescriptor::new(self.smell_kind(), self.applicable_types(), self.id())
    }

    /// Defaults for every parameter, including `mostly`.
    fn default_parameters(&self) -> ParameterOverrides;

    /// Parameters that are fixed by the rule and may not be overridden.
    fn immutable_parameters(&self) -> &'static [&'static str] {
        &[]
    }

    /// Checks the checker specific constraints of resolved parameters.
    fn validate_resolved(&self, _params: &Parameters) -> Result<()> {
        Ok(())
    }

    /// Validates overrides as they would be supplied by a configuration.
    fn validate_parameters(&self, overrides: &ParameterOverrides) -> Result<()> {
        let id = self.id();
        let defaults = self.default_parameters();
        parameters::check_keys(id.as_str(), overrides, &defaults, self.immutable_parameters())?;
        let params = Parameters::resolve(&defaults, overrides);
        params.mostly()?;
        self.validate_resolved(&params)
    }

    /// Evaluates every row of a column.
    ///
    /// The returned vector has one entry per input value.
    fn evaluate(&self, values: &[CellValue], params: &Parameters) -> Result<RowVerdicts>;
}

/// A shared, type-erased checker.
pub type BoxedChecker = Arc<dyn Checker>;

/// All built-in checkers, in a fixed order.
pub fn default_checkers() -> Vec<BoxedChecker> {
    vec![
        Arc::new(CasingChecker),
        Arc::new(DuplicatedValueChecker),
        Arc::new(ExtremeValueChecker),
        Arc::new(PatternChecker::float_as_string()),
        Arc::new(IntegerAsFloatChecker),
        Arc::new(PatternChecker::integer_as_string()),
        Arc::new(LongDataValueChecker),
        Arc::new(MissingValueChecker),
        Arc::new(SuspectSignChecker),
    ]
}

/// Reads the numeric values of a column, `None` for missing values.
pub(crate) fn numeric_values(checker: &str, values: &[CellValue]) -> Result<Vec<Option<f64>>> {
    values
        .iter()
        .map(|value| {
            if value.is_null() {
                return Ok(None);
            }
            value.as_f64().map(Some).ok_or_else(|| {
                SmellError::type_mismatch(
                    format!("numeric values for '{checker}'"),
                    value.type_name(),
                )
            })
        })
        .collect()
}
