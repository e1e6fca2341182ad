//! # smell-guard - Data Smell Detection for Rust
//!
//! smell-guard inspects tabular datasets for *data smells*: values that are
//! not necessarily wrong but hint at quality problems, such as integers
//! stored as text, a lone negative amount or inconsistent casing. It runs on
//! Arrow data and uses DataFusion to read columns.
//!
//! ## Quick Start
//!
//! ```rust
//! use smell_guard::prelude::*;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("amount", DataType::Int64, true),
//!     Field::new("zip", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![-300, 1, 2, 3, 4, 5, 6, 7, 8, 9])),
//!         Arc::new(StringArray::from(vec!["10115"; 10])),
//!     ],
//! )?;
//! let dataset = InMemoryDataset::from_batch("orders", batch);
//!
//! let config = DetectionConfiguration::builder()
//!     .smell(SmellKind::ExtremeValue)
//!     .smell(SmellKind::SuspectSign)
//!     .smell_with(SmellKind::IntegerAsString, [("mostly", json!(0.5))])
//!     .build();
//!
//! let detector = SmellDetector::builder(Arc::new(dataset))
//!     .configuration(config)
//!     .build()?;
//!
//! for result in detector.detect().await? {
//!     println!(
//!         "{} in {}: {:?}",
//!         result.data_smell_type, result.column_name, result.faulty_elements
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`smells`**: the catalog of data smell kinds
//! - **`checkers`**: per-row rules, one per supported smell
//! - **`core`**: registry, configuration, profiler, executor, converter and detector
//! - **`sources`**: loading datasets, e.g. from a directory of CSV files
//! - **`formatters`**: JSON, terminal and Markdown reports
//! - **`logging`**: `tracing` configuration helpers
//!
//! Custom rules implement [`checkers::Checker`] and are registered in a
//! [`core::RuleRegistry`] handed to the detector.

pub mod checkers;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod security;
pub mod smells;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
