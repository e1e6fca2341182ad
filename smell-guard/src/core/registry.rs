//! Registry of checkers per column type and smell kind.

use crate::checkers::{default_checkers, BoxedChecker, CheckerId};
use crate::core::ColumnType;
use crate::prelude::*;
use crate::smells::SmellKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// Associates a smell kind and its column types with a checker id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerDescriptor {
    /// The smell the checker detects
    pub smell_kind: SmellKind,
    /// The column types the checker applies to
    pub applicable_types: BTreeSet<ColumnType>,
    /// The checker implementation to invoke
    pub checker_id: CheckerId,
}

impl CheckerDescriptor {
    /// Creates a descriptor.
    pub fn new(
        smell_kind: SmellKind,
        applicable_types: impl IntoIterator<Item = ColumnType>,
        checker_id: impl Into<CheckerId>,
    ) -> Self {
        Self {
            smell_kind,
            applicable_types: applicable_types.into_iter().collect(),
            checker_id: checker_id.into(),
        }
    }
}

/// Maps (column type, smell kind) pairs to checkers.
///
/// Two indices are maintained over the registered descriptors: column type
/// to `{smell kind -> checker id}` and checker id back to smell kind. Both
/// are updated by [`register`](Self::register) and nothing else, so they
/// cannot drift apart. Re-registering a smell kind for a type replaces the
/// previous checker id (last write wins).
///
/// A registry is mutated during setup and shared read-only afterwards,
/// typically behind an `Arc`.
///
/// # Examples
///
/// ```rust
/// use smell_guard::core::{CheckerDescriptor, ColumnType, RuleRegistry};
/// use smell_guard::smells::SmellKind;
///
/// let mut registry = RuleRegistry::new();
/// registry.register(CheckerDescriptor::new(
///     SmellKind::ExtremeValue,
///     [ColumnType::Int, ColumnType::Float],
///     "extreme_value_smell",
/// ));
///
/// assert_eq!(registry.get_checks_for_type(ColumnType::Int).len(), 1);
/// assert!(registry.get_checks_for_type(ColumnType::String).is_empty());
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    by_column_type: BTreeMap<ColumnType, BTreeMap<SmellKind, CheckerId>>,
    smell_by_checker: BTreeMap<CheckerId, SmellKind>,
    checkers: HashMap<CheckerId, BoxedChecker>,
}

impl RuleRegistry {
    /// Creates a registry with an empty entry for every column type.
    pub fn new() -> Self {
        Self {
            by_column_type: ColumnType::ALL
                .into_iter()
                .map(|column_type| (column_type, BTreeMap::new()))
                .collect(),
            smell_by_checker: BTreeMap::new(),
            checkers: HashMap::new(),
        }
    }

    /// Registers a descriptor in both indices.
    pub fn register(&mut self, descriptor: CheckerDescriptor) {
        debug!(
            checker.id = %descriptor.checker_id,
            smell.kind = %descriptor.smell_kind,
            column.types = ?descriptor.applicable_types,
            "Registering checker"
        );
        for column_type in &descriptor.applicable_types {
            self.by_column_type
                .entry(*column_type)
                .or_default()
                .insert(descriptor.smell_kind, descriptor.checker_id.clone());
        }
        self.smell_by_checker
            .insert(descriptor.checker_id, descriptor.smell_kind);
    }

    /// Registers a checker implementation under its own descriptor.
    pub fn register_checker(&mut self, checker: BoxedChecker) {
        self.register(checker.descriptor());
        self.checkers.insert(checker.id(), checker);
    }

    /// Registers a checker implementation for a custom set of column types.
    pub fn register_checker_for(
        &mut self,
        checker: BoxedChecker,
        applicable_types: impl IntoIterator<Item = ColumnType>,
    ) {
        self.register(CheckerDescriptor::new(
            checker.smell_kind(),
            applicable_types,
            checker.id(),
        ));
        self.checkers.insert(checker.id(), checker);
    }

    /// Returns the smell kinds and checker ids registered for a column type.
    pub fn get_checks_for_type(&self, column_type: ColumnType) -> &BTreeMap<SmellKind, CheckerId> {
        static EMPTY: BTreeMap<SmellKind, CheckerId> = BTreeMap::new();
        self.by_column_type.get(&column_type).unwrap_or(&EMPTY)
    }

    /// Returns a copy of the checker id to smell kind index.
    pub fn get_checker_id_to_smell_kind(&self) -> BTreeMap<CheckerId, SmellKind> {
        self.smell_by_checker.clone()
    }

    /// Resolves a single checker id to its smell kind.
    pub fn smell_kind_of(&self, checker_id: &CheckerId) -> Option<SmellKind> {
        self.smell_by_checker.get(checker_id).copied()
    }

    /// Returns every smell kind with at least one registered checker.
    pub fn get_registered_smell_kinds(&self) -> BTreeSet<SmellKind> {
        self.smell_by_checker.values().copied().collect()
    }

    /// Returns the implementation registered for a checker id.
    pub fn checker(&self, checker_id: &CheckerId) -> Option<&BoxedChecker> {
        self.checkers.get(checker_id)
    }

    /// Returns the implementation for a checker id, failing if there is none.
    pub fn require_checker(&self, checker_id: &CheckerId) -> Result<&BoxedChecker> {
        self.checker(checker_id).ok_or_else(|| {
            SmellError::registry_desync(checker_id.as_str(), "has no registered implementation")
        })
    }

    /// Returns the implementations registered for a smell kind.
    pub fn checkers_for_smell(&self, smell_kind: SmellKind) -> Vec<&BoxedChecker> {
        self.smell_by_checker
            .iter()
            .filter(|(_, kind)| **kind == smell_kind)
            .filter_map(|(id, _)| self.checkers.get(id))
            .collect()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.smell_by_checker.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut implemented: Vec<_> = self.checkers.keys().collect();
        implemented.sort();
        f.debug_struct("RuleRegistry")
            .field("by_column_type", &self.by_column_type)
            .field("smell_by_checker", &self.smell_by_checker)
            .field("implemented", &implemented)
            .finish()
    }
}

/// Returns a fresh registry populated with every built-in checker.
///
/// Each call builds an independent instance, so tests can mutate their own
/// copy freely.
pub fn default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for checker in default_checkers() {
        registry.register_checker(checker);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::{ExtremeValueChecker, SuspectSignChecker};
    use std::sync::Arc;

    fn extreme_value() -> CheckerDescriptor {
        CheckerDescriptor::new(
            SmellKind::ExtremeValue,
            [ColumnType::Int, ColumnType::Float],
            "extreme_value_smell",
        )
    }

    #[test]
    fn test_new_registry_has_every_type() {
        let registry = RuleRegistry::new();
        for column_type in ColumnType::ALL {
            assert!(registry.get_checks_for_type(column_type).is_empty());
        }
        assert!(registry.is_empty());
        assert!(registry.get_registered_smell_kinds().is_empty());
    }

    #[test]
    fn test_register_updates_both_indices() {
        let mut registry = RuleRegistry::new();
        registry.register(extreme_value());

        let id = CheckerId::new("extreme_value_smell");
        assert_eq!(
            registry.get_checks_for_type(ColumnType::Int)[&SmellKind::ExtremeValue],
            id
        );
        assert_eq!(
            registry.get_checks_for_type(ColumnType::Float)[&SmellKind::ExtremeValue],
            id
        );
        assert!(registry.get_checks_for_type(ColumnType::String).is_empty());
        assert_eq!(registry.smell_kind_of(&id), Some(SmellKind::ExtremeValue));
        assert_eq!(
            registry.get_registered_smell_kinds(),
            BTreeSet::from([SmellKind::ExtremeValue])
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = RuleRegistry::new();
        registry.register(extreme_value());
        registry.register(CheckerDescriptor::new(
            SmellKind::ExtremeValue,
            [ColumnType::Int],
            "robust_extreme_value",
        ));

        assert_eq!(
            registry.get_checks_for_type(ColumnType::Int)[&SmellKind::ExtremeValue],
            CheckerId::new("robust_extreme_value")
        );
        assert_eq!(
            registry.get_checks_for_type(ColumnType::Float)[&SmellKind::ExtremeValue],
            CheckerId::new("extreme_value_smell")
        );
    }

    #[test]
    fn test_reverse_index_is_a_copy() {
        let mut registry = RuleRegistry::new();
        registry.register(extreme_value());

        let mut copy = registry.get_checker_id_to_smell_kind();
        copy.clear();
        assert_eq!(registry.get_checker_id_to_smell_kind().len(), 1);
    }

    #[test]
    fn test_default_registry() {
        let registry = default_registry();
        assert_eq!(registry.get_registered_smell_kinds().len(), 9);

        let string_checks = registry.get_checks_for_type(ColumnType::String);
        assert!(string_checks.contains_key(&SmellKind::Casing));
        assert!(string_checks.contains_key(&SmellKind::MissingValue));
        assert!(!string_checks.contains_key(&SmellKind::ExtremeValue));

        for smell in registry.get_registered_smell_kinds() {
            assert_eq!(registry.checkers_for_smell(smell).len(), 1);
        }
        assert_eq!(
            registry.get_checks_for_type(ColumnType::Boolean).len(),
            1,
            "only the missing value checker applies to booleans"
        );
    }

    #[test]
    fn test_require_checker() {
        let mut registry = RuleRegistry::new();
        registry.register(extreme_value());
        let id = CheckerId::new("extreme_value_smell");
        assert!(matches!(
            registry.require_checker(&id),
            Err(SmellError::RegistryDesync { .. })
        ));

        registry.register_checker(Arc::new(ExtremeValueChecker));
        assert!(registry.require_checker(&id).is_ok());
    }

    #[test]
    fn test_register_checker_for_custom_types() {
        let mut registry = RuleRegistry::new();
        registry.register_checker_for(Arc::new(SuspectSignChecker), [ColumnType::Int]);
        assert_eq!(registry.get_checks_for_type(ColumnType::Int).len(), 1);
        assert!(registry.get_checks_for_type(ColumnType::Float).is_empty());
    }
}
