//! Column type classification.

use crate::core::Dataset;
use crate::prelude::*;
use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// A coarse semantic classification of column content.
///
/// The column type decides which checkers apply to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// Signed or unsigned integers
    Int,
    /// Floating point numbers
    Float,
    /// Numbers that are neither plain integers nor floats (decimals)
    Numeric,
    /// Text
    String,
    /// Booleans
    Boolean,
    /// Dates and timestamps
    Datetime,
    /// Anything the classifier cannot place
    Unknown,
}

impl ColumnType {
    /// Every column type.
    pub const ALL: [ColumnType; 7] = [
        ColumnType::Int,
        ColumnType::Float,
        ColumnType::Numeric,
        ColumnType::String,
        ColumnType::Boolean,
        ColumnType::Datetime,
        ColumnType::Unknown,
    ];

    /// Returns true for the types holding numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Numeric)
    }

    /// Maps an Arrow data type onto a column type.
    pub fn from_arrow(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Self::Int,
            DataType::Float16 | DataType::Float32 | DataType::Float64 => Self::Float,
            DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => Self::Numeric,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Self::String,
            DataType::Boolean => Self::Boolean,
            DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
            | DataType::Time32(_)
            | DataType::Time64(_) => Self::Datetime,
            DataType::Dictionary(_, value_type) => Self::from_arrow(value_type),
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Numeric => "NUMERIC",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Datetime => "DATETIME",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Determines the [`ColumnType`] of a dataset column.
pub trait ColumnTypeClassifier: Debug + Send + Sync {
    /// Classifies a single column.
    fn classify(&self, dataset: &dyn Dataset, column: &str) -> Result<ColumnType>;
}

/// Classifies columns from the Arrow schema of the dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTypeClassifier;

impl ColumnTypeClassifier for SchemaTypeClassifier {
    fn classify(&self, dataset: &dyn Dataset, column: &str) -> Result<ColumnType> {
        let schema = dataset.schema();
        let field = schema
            .field_with_name(column)
            .map_err(|_| SmellError::ColumnNotFound {
                column: column.to_string(),
            })?;
        Ok(ColumnType::from_arrow(field.data_type()))
    }
}
