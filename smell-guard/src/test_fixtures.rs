//! Datasets for tests.
//!
//! [`smell_testset`] holds one or more planted smells per column, so a
//! detection run over it exercises every built-in checker.

use crate::core::InMemoryDataset;
use crate::error::Result;
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

fn column<A: Array + 'static>(name: &str, array: A) -> (&str, ArrayRef) {
    (name, Arc::new(array))
}

fn dataset(name: &str, columns: Vec<(&str, ArrayRef)>) -> Result<InMemoryDataset> {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    let batch = RecordBatch::try_new(schema, arrays)?;
    Ok(InMemoryDataset::from_batch(name, batch))
}

/// Ten rows with planted smells.
///
/// | column  | type   | planted smells                                   |
/// |---------|--------|--------------------------------------------------|
/// | int1    | INT    | extreme value and suspect sign (`-300`)          |
/// | int2    | INT    | duplicated value (`8`)                           |
/// | float1  | FLOAT  | extreme value and suspect sign (`-300.5`)        |
/// | float2  | FLOAT  | five values within 0.15 of an integer            |
/// | string1 | STRING | casing, a long word, a duplicated value          |
/// | string2 | STRING | integers stored as text                          |
/// | string3 | STRING | floats stored as text                            |
pub fn smell_testset() -> Result<InMemoryDataset> {
    let int1: Vec<i64> = std::iter::once(-300).chain(1..10).collect();
    let float1: Vec<f64> = std::iter::once(-300.5)
        .chain((1..10).map(|v| v as f64 + 0.5))
        .collect();

    dataset(
        "smell_testset",
        vec![
            column("int1", Int64Array::from(int1)),
            column("int2", Int64Array::from(vec![1, 2, 3, 4, 5, 6, 7, 8, 8, 9])),
            column("float1", Float64Array::from(float1)),
            column("float2", Float64Array::from(vec![
                1.1, 2.5, 3.5, 4.9, 5.1, 6.5, 7.5, 8.9, 9.1, 10.5,
            ])),
            column("string1", StringArray::from(vec![
                "abc def ghi",
                "abc def ghi",
                "cAsing 1",
                "CaSing 2",
                "all lowercase",
                "ALL UPPERCASE",
                "Pseudopseudohypoparathyroidism",
                "Hello World",
                "Data Smell",
                "Title Case Value",
            ])),
            column("string2", StringArray::from(vec![
                "2", "-3", "4", "-5", "6", "-7", "8", "-30", "9", "-10",
            ])),
            column("string3", StringArray::from(vec![
                "-2.2", "3.8", "-4.9", "5.1", "-6.2", "7.8", "-8.9", "9.1", "-10.2", "11.8",
            ])),
        ],
    )
}
