//! Error types for the smell-guard detection library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! is the [`SmellError`] enum derived with `thiserror`.

use thiserror::Error;

/// The main error type for smell detection.
#[derive(Error, Debug)]
pub enum SmellError {
    /// Invalid configuration or parameter values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A checker id that the registry cannot resolve.
    ///
    /// This means the battery and the registry were built from different
    /// registrations and is never caused by the data itself.
    #[error("Registry out of sync: checker '{checker_id}' {message}")]
    RegistryDesync {
        /// Identifier of the checker that could not be resolved
        checker_id: String,
        /// What exactly was missing
        message: String,
    },

    /// A checker failed while evaluating a column.
    #[error("Check '{checker_id}' failed on column '{column}': {message}")]
    CheckEvaluation {
        /// Identifier of the checker
        checker_id: String,
        /// Column being evaluated
        column: String,
        /// Detailed error message
        message: String,
    },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error while acquiring a dataset.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "directory")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A column is not part of the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A checker received values it cannot interpret.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Security-related error.
    #[error("Security error: {0}")]
    SecurityError(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, SmellError>`.
///
/// # Examples
///
/// ```rust
/// use smell_guard::error::{Result, SmellError};
///
/// fn positive(value: f64) -> Result<f64> {
///     if value > 0.0 {
///         Ok(value)
///     } else {
///         Err(SmellError::configuration("value must be positive"))
///     }
/// }
///
/// assert!(positive(1.0).is_ok());
/// assert!(positive(0.0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, SmellError>;

impl SmellError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a registry desynchronization error.
    pub fn registry_desync(checker_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistryDesync {
            checker_id: checker_id.into(),
            message: message.into(),
        }
    }

    /// Creates a check evaluation error.
    pub fn check_evaluation(
        checker_id: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::CheckEvaluation {
            checker_id: checker_id.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Returns true for errors caused by user supplied configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for SmellError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<SmellError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| wrap(msg, e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(&f(), e.into()))
    }
}

fn wrap(msg: &str, err: SmellError) -> SmellError {
    match err {
        SmellError::Configuration(inner) => SmellError::Configuration(format!("{msg}: {inner}")),
        SmellError::Internal(inner) => SmellError::Internal(format!("{msg}: {inner}")),
        other => SmellError::Internal(format!("{msg}: {other}")),
    }
}
