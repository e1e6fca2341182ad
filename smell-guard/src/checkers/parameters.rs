//! Checker parameters and their validation.
//!
//! Parameters travel as an ordered JSON map so that a battery entry records
//! exactly what was configured. [`Parameters`] is the resolved view a
//! checker reads from: its defaults merged with the overrides of one entry.

use crate::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parameter overrides for one checker, keyed by parameter name.
pub type ParameterOverrides = BTreeMap<String, Value>;

/// Name of the parameter carrying the column a battery entry targets.
pub const COLUMN: &str = "column";

/// Name of the minimum pass fraction parameter every checker accepts.
pub const MOSTLY: &str = "mostly";

/// Builds a [`ParameterOverrides`] map from key/value pairs.
///
/// ```rust
/// use smell_guard::checkers::parameters;
/// use serde_json::json;
///
/// let overrides = parameters::overrides([("threshold", json!(2.5))]);
/// assert_eq!(overrides["threshold"], json!(2.5));
/// ```
pub fn overrides<K, I>(entries: I) -> ParameterOverrides
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Resolved parameters of a single check.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    values: ParameterOverrides,
}

impl Parameters {
    /// Merges `overrides` over `defaults`; overrides win.
    pub fn resolve(defaults: &ParameterOverrides, overrides: &ParameterOverrides) -> Self {
        let mut values = defaults.clone();
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { values }
    }

    /// Returns the raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The column this check targets, if recorded.
    pub fn column(&self) -> Option<&str> {
        self.values.get(COLUMN).and_then(Value::as_str)
    }

    /// The resolved parameters as a map.
    pub fn as_map(&self) -> &ParameterOverrides {
        &self.values
    }

    /// Consumes the parameters, returning the map.
    pub fn into_map(self) -> ParameterOverrides {
        self.values
    }

    /// Reads a numeric parameter.
    pub fn f64(&self, key: &str) -> Result<f64> {
        match self.values.get(key) {
            Some(value) => value.as_f64().ok_or_else(|| {
                SmellError::configuration(format!(
                    "Parameter '{key}' must be a number, got {value}"
                ))
            }),
            None => Err(SmellError::configuration(format!(
                "Missing parameter '{key}'"
            ))),
        }
    }

    /// Reads a numeric parameter that must be strictly positive.
    pub fn positive_f64(&self, key: &str) -> Result<f64> {
        let value = self.f64(key)?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(SmellError::configuration(format!(
                "Parameter '{key}' must be positive, got {value}"
            )))
        }
    }

    /// Reads a numeric parameter that must lie in `[0, 1]`.
    pub fn fraction(&self, key: &str) -> Result<f64> {
        let value = self.f64(key)?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(SmellError::configuration(format!(
                "Parameter '{key}' must be between 0 and 1, got {value}"
            )))
        }
    }

    /// Reads an integer parameter that must be at least 1.
    pub fn positive_usize(&self, key: &str) -> Result<usize> {
        let invalid = || {
            SmellError::configuration(format!(
                "Parameter '{key}' must be a positive integer, got {}",
                self.values.get(key).unwrap_or(&Value::Null)
            ))
        };
        match self.values.get(key) {
            Some(value) => match value.as_u64() {
                Some(n) if n > 0 => usize::try_from(n).map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            None => Err(SmellError::configuration(format!(
                "Missing parameter '{key}'"
            ))),
        }
    }

    /// The minimum pass fraction.
    pub fn mostly(&self) -> Result<f64> {
        self.fraction(MOSTLY)
    }
}

/// Checks override keys against the parameters a checker knows.
///
/// `column` is always accepted. Keys listed in `immutable` are rejected even
/// though they have defaults.
pub(crate) fn check_keys(
    checker_id: &str,
    overrides: &ParameterOverrides,
    defaults: &ParameterOverrides,
    immutable: &[&str],
) -> Result<()> {
    for key in overrides.keys() {
        if immutable.contains(&key.as_str()) {
            return Err(SmellError::configuration(format!(
                "Parameter '{key}' of checker '{checker_id}' cannot be altered"
            )));
        }
        if key != COLUMN && !defaults.contains_key(key) {
            let mut known: Vec<&str> = defaults
                .keys()
                .map(String::as_str)
                .filter(|k| !immutable.contains(k))
                .collect();
            known.sort_unstable();
            return Err(SmellError::configuration(format!(
                "Unknown parameter '{key}' for checker '{checker_id}' (accepted: {})",
                known.join(", ")
            )));
        }
    }
    Ok(())
}
