//! The detection pipeline: profile, execute, convert.

use crate::core::{
    default_registry, CheckExecutor, ColumnTypeClassifier, DataFusionExecutor, Dataset,
    DetectionConfiguration, DetectionReport, ExtendedDetectionResult, Profiler, ResultConverter,
    RuleRegistry, SchemaTypeClassifier, StandardResultConverter, DEFAULT_SAMPLE_SIZE,
};
use crate::logging::LogConfig;
use crate::prelude::*;
use crate::smells::SmellKind;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Detects data smells in a dataset.
#[async_trait]
pub trait Detector: Debug + Send + Sync {
    /// Runs detection and returns one result per detected smell.
    async fn detect(&self) -> Result<Vec<ExtendedDetectionResult>>;

    /// The smell kinds this detector can report.
    fn supported_smell_kinds(&self) -> BTreeSet<SmellKind>;
}

/// The standard [`Detector`].
///
/// A run profiles the dataset into a battery of checks, executes the
/// battery and converts every failed check into a detection result.
/// Configuration errors surface when the detector is built, before any data
/// is read.
///
/// # Examples
///
/// ```rust,no_run
/// use smell_guard::core::{Detector, DetectionConfiguration, InMemoryDataset, SmellDetector};
/// use smell_guard::smells::SmellKind;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn example(dataset: InMemoryDataset) -> smell_guard::prelude::Result<()> {
/// let config = DetectionConfiguration::builder()
///     .smell_with(SmellKind::ExtremeValue, [("threshold", json!(2.5))])
///     .build();
///
/// let detector = SmellDetector::builder(Arc::new(dataset))
///     .configuration(config)
///     .build()?;
///
/// for result in detector.detect().await? {
///     println!("{}: {}", result.column_name, result.data_smell_type);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SmellDetector {
    dataset: Arc<dyn Dataset>,
    configuration: DetectionConfiguration,
    registry: Arc<RuleRegistry>,
    profiler: Profiler,
    executor: Arc<dyn CheckExecutor>,
    converter: Arc<dyn ResultConverter>,
    log_config: LogConfig,
}

impl SmellDetector {
    /// Starts building a detector for a dataset.
    pub fn builder(dataset: Arc<dyn Dataset>) -> DetectorBuilder {
        DetectorBuilder::new(dataset)
    }

    /// The resolved configuration.
    pub fn configuration(&self) -> &DetectionConfiguration {
        &self.configuration
    }

    /// The registry checks are resolved against.
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Runs detection and returns the results with run metadata.
    #[instrument(skip(self), fields(dataset.name = %self.dataset.name()))]
    pub async fn detect_report(&self) -> Result<DetectionReport> {
        let start = Instant::now();
        let dataset = self.dataset.as_ref();

        let battery = self.profiler.profile(dataset, &self.configuration)?;
        let outcomes = self
            .executor
            .execute(dataset, &battery, &self.registry)
            .await?;
        let results = self.converter.convert(&outcomes, &battery.column_types)?;

        let report = DetectionReport::new(
            dataset.name(),
            battery.column_types,
            results,
            &outcomes,
            start.elapsed().as_millis() as u64,
        );
        if self.log_config.log_metrics {
            info!(
                dataset.name = %report.dataset_name,
                checks.total = report.metrics.total_checks,
                checks.failed = report.metrics.failed_checks,
                checks.invalid = report.metrics.invalid_checks,
                duration_ms = report.metrics.execution_time_ms,
                "Detection completed"
            );
        }
        Ok(report)
    }
}

#[async_trait]
impl Detector for SmellDetector {
    async fn detect(&self) -> Result<Vec<ExtendedDetectionResult>> {
        Ok(self.detect_report().await?.results)
    }

    fn supported_smell_kinds(&self) -> BTreeSet<SmellKind> {
        self.registry.get_registered_smell_kinds()
    }
}

/// Builder for [`SmellDetector`].
///
/// The registry is taken from the builder, then from the configuration,
/// and defaults to [`default_registry`].
#[derive(Debug)]
pub struct DetectorBuilder {
    dataset: Arc<dyn Dataset>,
    configuration: DetectionConfiguration,
    registry: Option<Arc<RuleRegistry>>,
    classifier: Option<Arc<dyn ColumnTypeClassifier>>,
    executor: Option<Arc<dyn CheckExecutor>>,
    converter: Option<Arc<dyn ResultConverter>>,
    sample_size: usize,
    log_config: LogConfig,
}

impl DetectorBuilder {
    /// Creates a builder with the default configuration.
    pub fn new(dataset: Arc<dyn Dataset>) -> Self {
        Self {
            dataset,
            configuration: DetectionConfiguration::default(),
            registry: None,
            classifier: None,
            executor: None,
            converter: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            log_config: LogConfig::default(),
        }
    }

    /// Sets the detection configuration.
    pub fn configuration(mut self, configuration: DetectionConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Uses a custom registry.
    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Uses a custom column type classifier.
    pub fn classifier(mut self, classifier: Arc<dyn ColumnTypeClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Uses a custom executor. The sample size and log configuration of the
    /// builder then no longer apply.
    pub fn executor(mut self, executor: Arc<dyn CheckExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Uses a custom result converter.
    pub fn converter(mut self, converter: Arc<dyn ResultConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Sets how many faulty values each result keeps.
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the logging configuration of the default executor.
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Resolves the registry and validates the configuration against it.
    pub fn build(self) -> Result<SmellDetector> {
        let registry = self
            .registry
            .or_else(|| self.configuration.registry.clone())
            .unwrap_or_else(|| Arc::new(default_registry()));

        let mut configuration = self.configuration;
        configuration.registry = Some(Arc::clone(&registry));
        configuration.validate(&registry)?;

        let classifier = self
            .classifier
            .unwrap_or_else(|| Arc::new(SchemaTypeClassifier));
        let profiler = Profiler::with_classifier(classifier).with_registry(Arc::clone(&registry));
        let executor = self.executor.unwrap_or_else(|| {
            Arc::new(
                DataFusionExecutor::new()
                    .with_sample_size(self.sample_size)
                    .with_log_config(self.log_config.clone()),
            )
        });
        let converter = self
            .converter
            .unwrap_or_else(|| Arc::new(StandardResultConverter::new(Arc::clone(&registry))));

        Ok(SmellDetector {
            dataset: self.dataset,
            configuration,
            registry,
            profiler,
            executor,
            converter,
            log_config: self.log_config,
        })
    }
}
