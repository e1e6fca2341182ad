//! Shared helpers for integration tests.

#![allow(dead_code)]

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use smell_guard::core::InMemoryDataset;
use std::sync::Arc;

/// Builds a dataset from named columns.
pub fn dataset(name: &str, columns: Vec<(&str, ArrayRef)>) -> InMemoryDataset {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    let batch = RecordBatch::try_new(schema, arrays).unwrap();
    InMemoryDataset::from_batch(name, batch)
}

pub fn ints(values: Vec<i64>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

pub fn floats(values: Vec<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

pub fn texts(values: Vec<&str>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

/// `[-300, 1, 2, ..., 9]`
pub fn outlier_ints() -> Vec<i64> {
    std::iter::once(-300).chain(1..10).collect()
}

/// Five columns of five rows: two integer, two float and one text column.
pub fn profile_dataset() -> InMemoryDataset {
    dataset(
        "profile",
        vec![
            ("int_col1", ints(vec![0, 1, 2, 3, 4])),
            ("int_col2", ints(vec![1, 2, 3, 4, 5])),
            ("float_col1", floats(vec![0.0, 1.0, 2.0, 3.0, 4.0])),
            ("float_col2", floats(vec![0.1, 1.4, 2.5, 3.2, 4.8])),
            ("string_col1", texts(vec!["a", "b", "c", "d", "e"])),
        ],
    )
}
