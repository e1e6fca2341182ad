//! Core detection types.
//!
//! ## Overview
//!
//! - **[`RuleRegistry`]**: which checker detects which smell on which column type
//! - **[`DetectionConfiguration`]**: the columns and smells to inspect, with parameter overrides
//! - **[`Profiler`]**: expands a dataset into a [`Battery`] of checks
//! - **[`CheckExecutor`]**: runs a battery and yields raw [`CheckOutcome`]s
//! - **[`ResultConverter`]**: turns failed outcomes into [`ExtendedDetectionResult`]s
//! - **[`SmellDetector`]**: the whole pipeline behind the [`Detector`] trait
//!
//! ## Architecture
//!
//! ```text
//! Dataset ──► Profiler ──► Battery ──► CheckExecutor ──► CheckOutcome*
//!               ▲                           ▲                 │
//!        ColumnTypeClassifier          RuleRegistry           ▼
//!                                           └──────► ResultConverter ──► ExtendedDetectionResult*
//! ```
//!
//! ## Example
//!
//! ```rust
//! use smell_guard::core::{Detector, DetectionConfiguration, InMemoryDataset, SmellDetector};
//! use smell_guard::smells::SmellKind;
//! use arrow::array::Int64Array;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Arc::new(Schema::new(vec![Field::new("amount", DataType::Int64, true)]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![Arc::new(Int64Array::from(vec![-300, 1, 2, 3, 4, 5, 6, 7, 8, 9]))],
//! )?;
//! let dataset = InMemoryDataset::from_batch("payments", batch);
//!
//! let detector = SmellDetector::builder(Arc::new(dataset))
//!     .configuration(
//!         DetectionConfiguration::builder()
//!             .smell(SmellKind::ExtremeValue)
//!             .build(),
//!     )
//!     .build()?;
//!
//! let results = detector.detect().await?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].statistics.faulty_element_count, 1);
//! # Ok(())
//! # }
//! ```

pub mod column_type;
pub mod configuration;
pub mod converter;
pub mod dataset;
pub mod detector;
pub mod executor;
pub mod outcome;
pub mod profiler;
pub mod registry;
pub mod report;

pub use column_type::{ColumnType, ColumnTypeClassifier, SchemaTypeClassifier};
pub use configuration::{DetectionConfiguration, DetectionConfigurationBuilder, SmellConfiguration};
pub use converter::{invalid_outcomes, ResultConverter, StandardResultConverter};
pub use dataset::{Dataset, InMemoryDataset};
pub use detector::{Detector, DetectorBuilder, SmellDetector};
pub use executor::{array_to_values, CheckExecutor, DataFusionExecutor};
pub use outcome::{
    CheckOutcome, DetectionResult, DetectionStatistics, ExtendedDetectionResult,
    DEFAULT_SAMPLE_SIZE,
};
pub use profiler::{Battery, CheckSpec, Profiler};
pub use registry::{default_registry, CheckerDescriptor, RuleRegistry};
pub use report::{DetectionMetrics, DetectionReport, InvalidCheck};
