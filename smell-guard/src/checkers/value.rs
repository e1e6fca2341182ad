//! Cell values handed to checkers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single value of a column.
///
/// Serializes without a tag so that faulty element samples read like the
/// raw data (`-300`, `"abc"`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A missing value
    Null,
    /// A boolean value
    Boolean(bool),
    /// An integer value
    Integer(i64),
    /// A floating point value
    Float(f64),
    /// A text value, also used for types without a dedicated variant
    Text(String),
}

/// Hashable identity of a non-null value, used to find duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Boolean(bool),
    Integer(i64),
    Float(u64),
    Text(&'a str),
}

impl CellValue {
    /// Returns true for nulls and NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The textual rendering of a non-null value.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Text(value) => Some(Cow::Borrowed(value.as_str())),
            Self::Boolean(value) => Some(Cow::Owned(value.to_string())),
            Self::Integer(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// The identity used for duplicate detection. `None` for missing values.
    pub fn key(&self) -> Option<ValueKey<'_>> {
        if self.is_null() {
            return None;
        }
        Some(match self {
            Self::Boolean(value) => ValueKey::Boolean(*value),
            Self::Integer(value) => ValueKey::Integer(*value),
            // -0.0 and 0.0 are the same value
            Self::Float(value) if *value == 0.0 => ValueKey::Float(0.0f64.to_bits()),
            Self::Float(value) => ValueKey::Float(value.to_bits()),
            Self::Text(value) => ValueKey::Text(value.as_str()),
            Self::Null => return None,
        })
    }

    /// A short name of the variant for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
