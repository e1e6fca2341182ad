//! Prelude for commonly used types and traits in smell-guard.

pub use crate::core::{
    Dataset, DetectionConfiguration, DetectionReport, Detector, ExtendedDetectionResult,
    InMemoryDataset, RuleRegistry, SmellDetector,
};
pub use crate::error::{ErrorContext, Result, SmellError};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::smells::SmellKind;
