//! Typed detection configuration.

use crate::checkers::ParameterOverrides;
use crate::core::RuleRegistry;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Parameter overrides per smell kind.
pub type SmellConfiguration = BTreeMap<SmellKind, ParameterOverrides>;

/// What to detect and with which parameters.
///
/// * `column_names` restricts detection to the named columns.
/// * `data_smell_configuration`, when present, selects the smell kinds to
///   detect and their parameter overrides. Registered smells missing from
///   the map are not checked. When absent, every registered smell runs with
///   default parameters.
/// * `registry` replaces the default registry.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::DetectionConfiguration;
/// use smell_guard::smells::SmellKind;
/// use serde_json::json;
///
/// let config = DetectionConfiguration::builder()
///     .column_names(["age", "income"])
///     .smell_with(SmellKind::ExtremeValue, [("threshold", json!(2.5))])
///     .smell(SmellKind::SuspectSign)
///     .build();
///
/// assert_eq!(config.smell_configuration().map(|c| c.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfiguration {
    /// Columns to restrict detection to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_names: Option<BTreeSet<String>>,
    /// Smell kinds to detect and their parameter overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_smell_configuration: Option<SmellConfiguration>,
    /// Registry to use instead of the default one
    #[serde(skip)]
    pub registry: Option<Arc<RuleRegistry>>,
}

impl DetectionConfiguration {
    /// Starts building a configuration.
    pub fn builder() -> DetectionConfigurationBuilder {
        DetectionConfigurationBuilder::default()
    }

    /// Parses the column and smell settings from JSON.
    ///
    /// ```rust
    /// use smell_guard::core::DetectionConfiguration;
    ///
    /// let config = DetectionConfiguration::from_json(
    ///     r#"{"data_smell_configuration": {"EXTREME_VALUE_SMELL": {"threshold": 2}}}"#,
    /// ).unwrap();
    /// assert!(config.column_names.is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SmellError::configuration(format!("Invalid configuration: {e}")))?;
        debug!(
            config.columns = ?config.column_names,
            config.smells = config.data_smell_configuration.as_ref().map(|c| c.len()),
            "Parsed detection configuration"
        );
        Ok(config)
    }

    /// The smell map, if one was provided.
    pub fn smell_configuration(&self) -> Option<&SmellConfiguration> {
        self.data_smell_configuration.as_ref()
    }

    /// Returns true if `column` passes the column restriction.
    pub fn includes_column(&self, column: &str) -> bool {
        self.column_names
            .as_ref()
            .map_or(true, |names| names.contains(column))
    }

    /// Resolves the smell map against a registry.
    ///
    /// Without an explicit map every registered smell gets empty overrides.
    pub fn resolve_smells(&self, registry: &RuleRegistry) -> SmellConfiguration {
        match &self.data_smell_configuration {
            Some(map) => map.clone(),
            None => registry
                .get_registered_smell_kinds()
                .into_iter()
                .map(|kind| (kind, ParameterOverrides::new()))
                .collect(),
        }
    }

    /// Validates the overrides of every configured smell against each
    /// checker registered for it.
    pub fn validate(&self, registry: &RuleRegistry) -> Result<()> {
        let Some(map) = &self.data_smell_configuration else {
            return Ok(());
        };
        for (smell_kind, overrides) in map {
            for checker in registry.checkers_for_smell(*smell_kind) {
                checker
                    .validate_parameters(overrides)
                    .with_context(|| format!("{smell_kind} ({})", checker.id()))?;
            }
        }
        Ok(())
    }
}

/// Builder for [`DetectionConfiguration`].
#[derive(Debug, Default)]
pub struct DetectionConfigurationBuilder {
    column_names: Option<BTreeSet<String>>,
    smells: Option<SmellConfiguration>,
    registry: Option<Arc<RuleRegistry>>,
}

impl DetectionConfigurationBuilder {
    /// Restricts detection to the given columns.
    pub fn column_names<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_names = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a smell kind with default parameters.
    pub fn smell(self, smell_kind: SmellKind) -> Self {
        self.smell_overrides(smell_kind, ParameterOverrides::new())
    }

    /// Adds a smell kind with parameter overrides given as pairs.
    pub fn smell_with<K, I>(self, smell_kind: SmellKind, overrides: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, serde_json::Value)>,
    {
        self.smell_overrides(smell_kind, crate::checkers::parameters::overrides(overrides))
    }

    /// Adds a smell kind with a parameter override map.
    pub fn smell_overrides(mut self, smell_kind: SmellKind, overrides: ParameterOverrides) -> Self {
        self.smells
            .get_or_insert_with(BTreeMap::new)
            .insert(smell_kind, overrides);
        self
    }

    /// Uses an explicit, possibly empty, smell map.
    pub fn smell_configuration(mut self, smells: SmellConfiguration) -> Self {
        self.smells = Some(smells);
        self
    }

    /// Uses the given registry.
    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> DetectionConfiguration {
        DetectionConfiguration {
            column_names: self.column_names,
            data_smell_configuration: self.smells,
            registry: self.registry,
        }
    }
}
