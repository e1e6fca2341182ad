//! Rendering of detection reports.
//!
//! Reports can be rendered as JSON for tools, as plain text for terminals
//! or as Markdown for documentation.
//!
//! # Examples
//!
//! ```rust
//! use smell_guard::core::DetectionReport;
//! use smell_guard::formatters::{HumanFormatter, ReportFormatter};
//!
//! let report = DetectionReport::new("empty", Default::default(), Vec::new(), &[], 0);
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("No data smells detected"));
//! ```

use crate::checkers::CellValue;
use crate::core::{DetectionReport, ExtendedDetectionResult};
use crate::prelude::*;
use serde_json::Value;
use std::fmt::{self, Write};

/// Configuration options for rendering reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include run counters
    pub include_metrics: bool,
    /// Include the individual detection results
    pub include_results: bool,
    /// Include the parameters of the check behind each result
    pub include_parameters: bool,
    /// Maximum number of results to render, all when `None`
    pub max_results: Option<usize>,
    /// Maximum number of faulty values to render per result
    pub max_faulty_elements: usize,
    /// Whether to use ANSI colors (human formatter)
    pub use_colors: bool,
    /// Whether to include the report timestamp
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_metrics: true,
            include_results: true,
            include_parameters: false,
            max_results: None,
            max_faulty_elements: 10,
            use_colors: true,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the summary.
    pub fn minimal() -> Self {
        Self {
            include_metrics: true,
            include_results: false,
            include_parameters: false,
            max_results: Some(0),
            max_faulty_elements: 0,
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_metrics: true,
            include_results: true,
            include_parameters: true,
            max_results: None,
            max_faulty_elements: usize::MAX,
            use_colors: true,
            include_timestamps: true,
        }
    }

    /// Creates a configuration suitable for CI logs.
    pub fn ci() -> Self {
        Self {
            include_metrics: true,
            include_results: true,
            include_parameters: false,
            max_results: Some(50),
            max_faulty_elements: 5,
            use_colors: false,
            include_timestamps: true,
        }
    }

    /// Sets whether to include run counters.
    pub fn with_metrics(mut self, include: bool) -> Self {
        self.include_metrics = include;
        self
    }

    /// Sets whether to include detection results.
    pub fn with_results(mut self, include: bool) -> Self {
        self.include_results = include;
        self
    }

    /// Sets whether to include check parameters.
    pub fn with_parameters(mut self, include: bool) -> Self {
        self.include_parameters = include;
        self
    }

    /// Sets the maximum number of results to render.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Sets the maximum number of faulty values per result.
    pub fn with_max_faulty_elements(mut self, max: usize) -> Self {
        self.max_faulty_elements = max;
        self
    }

    /// Sets whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn visible_results<'a>(&self, report: &'a DetectionReport) -> &'a [ExtendedDetectionResult] {
        if !self.include_results {
            return &[];
        }
        let max = self.max_results.unwrap_or(usize::MAX);
        &report.results[..max.min(report.results.len())]
    }
}

/// Renders a detection report into a string.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::DetectionReport;
/// use smell_guard::formatters::ReportFormatter;
///
/// struct CountFormatter;
///
/// impl ReportFormatter for CountFormatter {
///     fn format(&self, report: &DetectionReport) -> smell_guard::prelude::Result<String> {
///         Ok(format!("{} smells", report.results.len()))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Renders a report.
    fn format(&self, report: &DetectionReport) -> Result<String>;

    /// Renders a report with an explicit configuration.
    fn format_with_config(
        &self,
        report: &DetectionReport,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(report)
    }
}

fn render_error(e: fmt::Error) -> SmellError {
    SmellError::Internal(format!("Failed to render report: {e}"))
}

fn faulty_sample(elements: &[CellValue], max: usize) -> String {
    let mut sample = elements
        .iter()
        .take(max)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if elements.len() > max {
        if !sample.is_empty() {
            sample.push_str(", ");
        }
        sample.push_str(&format!("... ({} more)", elements.len() - max));
    }
    sample
}

/// Renders reports as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a pretty printing JSON formatter.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a JSON formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to pretty print.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &DetectionReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DetectionReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_report(report, config)?;
        let output = if self.pretty {
            serde_json::to_string_pretty(&filtered)
        } else {
            serde_json::to_string(&filtered)
        };
        output.map_err(|e| SmellError::Serialization(format!("Failed to serialize report: {e}")))
    }
}

/// Drops the parts of a serialized report the configuration excludes.
fn filter_report(report: &DetectionReport, config: &FormatterConfig) -> Result<Value> {
    let mut filtered = report.clone();
    filtered.results = config.visible_results(report).to_vec();
    for result in &mut filtered.results {
        result
            .result
            .faulty_elements
            .truncate(config.max_faulty_elements);
    }

    let mut value = serde_json::to_value(&filtered)?;
    if let Some(object) = value.as_object_mut() {
        if !config.include_metrics {
            object.remove("metrics");
        }
        if !config.include_timestamps {
            object.remove("timestamp");
        }
        if !config.include_results {
            object.remove("results");
        }
        if !config.include_parameters {
            if let Some(Value::Array(results)) = object.get_mut("results") {
                for result in results.iter_mut().filter_map(Value::as_object_mut) {
                    result.remove("parameters");
                }
            }
        }
    }
    Ok(value)
}

/// Renders reports as plain text for terminals.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a human formatter with the default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a human formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn render(
        &self,
        output: &mut String,
        report: &DetectionReport,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let paint = |text: String, code: &str| {
            if config.use_colors {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text
            }
        };

        writeln!(output)?;
        if report.has_smells() {
            let headline = format!("{} data smells detected", report.results.len());
            writeln!(output, "{}", paint(headline, "31"))?;
        } else {
            writeln!(output, "{}", paint("No data smells detected".to_string(), "32"))?;
        }
        writeln!(output)?;
        writeln!(output, "Dataset: {}", report.dataset_name)?;
        if config.include_timestamps {
            writeln!(output, "Timestamp: {}", report.timestamp)?;
        }

        if config.include_metrics {
            let metrics = &report.metrics;
            writeln!(output)?;
            writeln!(output, "Summary:")?;
            writeln!(output, "   Columns: {}", report.column_types.len())?;
            writeln!(output, "   Total Checks: {}", metrics.total_checks)?;
            writeln!(output, "   Passed: {}", paint(metrics.passed_checks.to_string(), "32"))?;
            writeln!(output, "   Smelly: {}", paint(metrics.failed_checks.to_string(), "31"))?;
            writeln!(output, "   Invalid: {}", paint(metrics.invalid_checks.to_string(), "33"))?;
            writeln!(output, "   Success Rate: {:.1}%", metrics.success_rate())?;
            writeln!(output, "   Execution Time: {}ms", metrics.execution_time_ms)?;
        }

        let visible = config.visible_results(report);
        if !visible.is_empty() {
            writeln!(output)?;
            writeln!(output, "Detected Smells:")?;
            for (i, result) in visible.iter().enumerate() {
                writeln!(output)?;
                writeln!(
                    output,
                    "   #{} {} in '{}' ({})",
                    i + 1,
                    result.data_smell_type.name(),
                    result.column_name,
                    result.column_type
                )?;
                writeln!(
                    output,
                    "      Faulty: {} of {} ({:.1}%)",
                    result.statistics.faulty_element_count,
                    result.statistics.total_element_count,
                    result.statistics.faulty_ratio() * 100.0
                )?;
                if config.max_faulty_elements > 0 && !result.faulty_elements.is_empty() {
                    writeln!(
                        output,
                        "      Values: {}",
                        faulty_sample(&result.faulty_elements, config.max_faulty_elements)
                    )?;
                }
                if config.include_parameters {
                    writeln!(
                        output,
                        "      Parameters: {}",
                        Value::Object(result.parameters.clone().into_iter().collect())
                    )?;
                }
            }
            if report.results.len() > visible.len() {
                writeln!(output)?;
                writeln!(
                    output,
                    "   ... and {} more results",
                    report.results.len() - visible.len()
                )?;
            }
        }

        if !report.invalid_checks.is_empty() {
            writeln!(output)?;
            writeln!(output, "{}", paint("Checks that could not run:".to_string(), "33"))?;
            for invalid in &report.invalid_checks {
                writeln!(
                    output,
                    "   {} on '{}': {}",
                    invalid.checker_id, invalid.column, invalid.message
                )?;
            }
        }

        writeln!(output)
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &DetectionReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DetectionReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.render(&mut output, report, config)
            .map_err(render_error)?;
        Ok(output)
    }
}

/// Renders reports as Markdown.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a Markdown formatter with level 2 headings.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a Markdown formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level, clamped to 1..=6.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    fn render(
        &self,
        output: &mut String,
        report: &DetectionReport,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Data Smell Report: {}", report.dataset_name)?;
        writeln!(output)?;
        if config.include_timestamps {
            writeln!(output, "**Timestamp:** {}", report.timestamp)?;
            writeln!(output)?;
        }

        if config.include_metrics {
            let metrics = &report.metrics;
            writeln!(output, "{h}# Summary")?;
            writeln!(output)?;
            writeln!(output, "| Metric | Value |")?;
            writeln!(output, "|--------|-------|")?;
            writeln!(output, "| Columns | {} |", report.column_types.len())?;
            writeln!(output, "| Total Checks | {} |", metrics.total_checks)?;
            writeln!(output, "| Passed | {} |", metrics.passed_checks)?;
            writeln!(output, "| Smelly | {} |", metrics.failed_checks)?;
            writeln!(output, "| Invalid | {} |", metrics.invalid_checks)?;
            writeln!(output, "| Execution Time | {}ms |", metrics.execution_time_ms)?;
            writeln!(output)?;
        }

        let visible = config.visible_results(report);
        if !visible.is_empty() {
            writeln!(output, "{h}# Detected Smells")?;
            writeln!(output)?;
            writeln!(output, "| Column | Type | Smell | Faulty | Sample |")?;
            writeln!(output, "|--------|------|-------|--------|--------|")?;
            for result in visible {
                writeln!(
                    output,
                    "| {} | {} | {} | {}/{} | {} |",
                    result.column_name,
                    result.column_type,
                    result.data_smell_type.name(),
                    result.statistics.faulty_element_count,
                    result.statistics.total_element_count,
                    faulty_sample(&result.faulty_elements, config.max_faulty_elements)
                        .replace('|', "\\|")
                )?;
            }
            writeln!(output)?;
            if report.results.len() > visible.len() {
                writeln!(
                    output,
                    "> **Note:** {} additional results not shown in this report.",
                    report.results.len() - visible.len()
                )?;
                writeln!(output)?;
            }
        }

        if !report.invalid_checks.is_empty() {
            writeln!(output, "{h}# Invalid Checks")?;
            writeln!(output)?;
            for invalid in &report.invalid_checks {
                writeln!(
                    output,
                    "- `{}` on `{}`: {}",
                    invalid.checker_id, invalid.column, invalid.message
                )?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &DetectionReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DetectionReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.render(&mut output, report, config)
            .map_err(render_error)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CheckOutcome, CheckSpec, ColumnType, DetectionResult, DetectionStatistics,
    };
    use crate::smells::SmellKind;
    use std::collections::BTreeMap;

    fn result(column: &str, kind: SmellKind, faulty: Vec<CellValue>) -> ExtendedDetectionResult {
        ExtendedDetectionResult {
            result: DetectionResult {
                column_name: column.to_string(),
                data_smell_type: kind,
                statistics: DetectionStatistics::new(10, faulty.len()),
                faulty_elements: faulty,
            },
            column_type: ColumnType::Int,
            parameters: crate::checkers::parameters::overrides([(
                "column",
                serde_json::json!(column),
            )]),
        }
    }

    fn report() -> DetectionReport {
        let spec = CheckSpec::new("name", "extreme_value_smell", &Default::default());
        let outcomes = vec![CheckOutcome::from_exception(
            spec,
            Default::default(),
            10,
            "expected numeric values",
        )];
        let mut report = DetectionReport::new(
            "customers",
            BTreeMap::from([
                ("age".to_string(), ColumnType::Int),
                ("name".to_string(), ColumnType::String),
            ]),
            vec![
                result("age", SmellKind::ExtremeValue, vec![CellValue::Integer(-300)]),
                result(
                    "age",
                    SmellKind::DuplicatedValue,
                    vec![CellValue::Integer(8), CellValue::Integer(8)],
                ),
            ],
            &outcomes,
            42,
        );
        report.metrics.total_checks = 5;
        report.metrics.passed_checks = 2;
        report.metrics.failed_checks = 2;
        report
    }

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert!(config.include_metrics);
        assert!(config.include_results);
        assert!(config.use_colors);

        let minimal = FormatterConfig::minimal();
        assert!(!minimal.include_results);
        assert!(!minimal.use_colors);

        assert_eq!(FormatterConfig::ci().max_results, Some(50));
    }

    #[test]
    fn test_json_formatter() {
        let output = JsonFormatter::new().format(&report()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["dataset_name"], "customers");
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][0]["data_smell_type"], "EXTREME_VALUE_SMELL");
        assert!(value["results"][0].get("parameters").is_none());
        assert_eq!(value["metrics"]["execution_time_ms"], 42);

        let minimal = JsonFormatter::new()
            .with_pretty(false)
            .format_with_config(&report(), &FormatterConfig::minimal())
            .unwrap();
        let value: Value = serde_json::from_str(&minimal).unwrap();
        assert!(value.get("results").is_none());
        assert!(value.get("timestamp").is_none());

        let detailed = JsonFormatter::with_config(FormatterConfig::detailed())
            .format(&report())
            .unwrap();
        assert!(detailed.contains("\"parameters\""));
    }

    #[test]
    fn test_human_formatter() {
        let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
        let output = formatter.format(&report()).unwrap();
        assert!(output.contains("2 data smells detected"));
        assert!(output.contains("Dataset: customers"));
        assert!(output.contains("Total Checks: 5"));
        assert!(output.contains("Extreme Value Smell in 'age' (INT)"));
        assert!(output.contains("Values: -300"));
        assert!(output.contains("extreme_value_smell on 'name': expected numeric values"));
        assert!(!output.contains("\x1b["));

        let colored = HumanFormatter::new().format(&report()).unwrap();
        assert!(colored.contains("\x1b[31m"));
    }

    #[test]
    fn test_result_limits() {
        let config = FormatterConfig::default()
            .with_colors(false)
            .with_max_results(1)
            .with_max_faulty_elements(1);
        let output = HumanFormatter::new()
            .format_with_config(&report(), &config)
            .unwrap();
        assert!(output.contains("#1"));
        assert!(!output.contains("#2"));
        assert!(output.contains("... and 1 more results"));
    }

    #[test]
    fn test_markdown_formatter() {
        let output = MarkdownFormatter::new().format(&report()).unwrap();
        assert!(output.contains("## Data Smell Report: customers"));
        assert!(output.contains("| Total Checks | 5 |"));
        assert!(output.contains("| age | INT | Duplicated Value Smell | 2/10 | 8, 8 |"));
        assert!(output.contains("### Invalid Checks"));

        let output = MarkdownFormatter::new()
            .with_heading_level(1)
            .format(&report())
            .unwrap();
        assert!(output.starts_with("# Data Smell Report"));
    }

    #[test]
    fn test_faulty_sample() {
        let values = vec![CellValue::from("a|b"), CellValue::Integer(1), CellValue::Null];
        assert_eq!(faulty_sample(&values, 2), "\"a|b\", 1, ... (1 more)");
        assert_eq!(faulty_sample(&values, 0), "... (3 more)");
    }
}
