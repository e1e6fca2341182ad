//! Property tests for the rule registry indices.

use proptest::prelude::*;
use smell_guard::checkers::CheckerId;
use smell_guard::core::{default_registry, CheckerDescriptor, ColumnType, RuleRegistry};
use smell_guard::smells::SmellKind;
use std::collections::{BTreeMap, BTreeSet};

fn descriptor_strategy() -> impl Strategy<Value = CheckerDescriptor> {
    (
        0..SmellKind::ALL.len(),
        proptest::sample::subsequence(ColumnType::ALL.to_vec(), 0..=ColumnType::ALL.len()),
    )
        .prop_map(|(kind, types)| {
            let smell_kind = SmellKind::ALL[kind];
            CheckerDescriptor::new(
                smell_kind,
                types,
                smell_kind.identifier().to_lowercase(),
            )
        })
}

fn snapshot(registry: &RuleRegistry) -> Vec<BTreeMap<SmellKind, CheckerId>> {
    ColumnType::ALL
        .iter()
        .map(|column_type| registry.get_checks_for_type(*column_type).clone())
        .collect()
}

proptest! {
    /// Every checker id reachable through a column type resolves back to
    /// the smell kind it is listed under.
    #[test]
    fn prop_indices_agree(descriptors in prop::collection::vec(descriptor_strategy(), 0..20)) {
        let mut registry = RuleRegistry::new();
        for descriptor in &descriptors {
            registry.register(descriptor.clone());
        }

        let reverse = registry.get_checker_id_to_smell_kind();
        for column_type in ColumnType::ALL {
            for (smell_kind, checker_id) in registry.get_checks_for_type(column_type) {
                prop_assert_eq!(reverse.get(checker_id), Some(smell_kind));
            }
        }

        let registered: BTreeSet<SmellKind> =
            descriptors.iter().map(|d| d.smell_kind).collect();
        prop_assert_eq!(registry.get_registered_smell_kinds(), registered);
    }

    /// Registering the same descriptors again changes nothing.
    #[test]
    fn prop_registration_is_idempotent(descriptors in prop::collection::vec(descriptor_strategy(), 1..20)) {
        let mut registry = RuleRegistry::new();
        for descriptor in &descriptors {
            registry.register(descriptor.clone());
        }
        let before = snapshot(&registry);
        let reverse_before = registry.get_checker_id_to_smell_kind();

        for descriptor in &descriptors {
            registry.register(descriptor.clone());
        }
        prop_assert_eq!(snapshot(&registry), before);
        prop_assert_eq!(registry.get_checker_id_to_smell_kind(), reverse_before);
    }

    /// A descriptor only shows up under the column types it names.
    #[test]
    fn prop_types_are_respected(descriptor in descriptor_strategy()) {
        let mut registry = RuleRegistry::new();
        registry.register(descriptor.clone());

        for column_type in ColumnType::ALL {
            let checks = registry.get_checks_for_type(column_type);
            if descriptor.applicable_types.contains(&column_type) {
                prop_assert_eq!(checks.get(&descriptor.smell_kind), Some(&descriptor.checker_id));
            } else {
                prop_assert!(checks.is_empty());
            }
        }
    }
}

#[test]
fn test_default_registry_per_type() {
    let registry = default_registry();
    let kinds = |column_type| -> BTreeSet<SmellKind> {
        registry
            .get_checks_for_type(column_type)
            .keys()
            .copied()
            .collect()
    };

    assert_eq!(
        kinds(ColumnType::Int),
        BTreeSet::from([
            SmellKind::DuplicatedValue,
            SmellKind::ExtremeValue,
            SmellKind::MissingValue,
            SmellKind::SuspectSign,
        ])
    );
    assert_eq!(
        kinds(ColumnType::Float),
        BTreeSet::from([
            SmellKind::ExtremeValue,
            SmellKind::IntegerAsFloatingPointNumber,
            SmellKind::MissingValue,
            SmellKind::SuspectSign,
        ])
    );
    assert_eq!(kinds(ColumnType::String).len(), 6);
    assert_eq!(
        kinds(ColumnType::Boolean),
        BTreeSet::from([SmellKind::MissingValue])
    );
    assert_eq!(registry.get_registered_smell_kinds().len(), 9);
}

#[test]
fn test_fresh_default_registries_are_independent() {
    let mut first = default_registry();
    first.register(CheckerDescriptor::new(
        SmellKind::DummyValue,
        [ColumnType::Int],
        "dummy_value_smell",
    ));

    let second = default_registry();
    assert!(first
        .get_registered_smell_kinds()
        .contains(&SmellKind::DummyValue));
    assert!(!second
        .get_registered_smell_kinds()
        .contains(&SmellKind::DummyValue));
}

#[test]
fn test_last_registration_wins() {
    let mut registry = RuleRegistry::new();
    registry.register(CheckerDescriptor::new(
        SmellKind::Casing,
        [ColumnType::String],
        "casing_v1",
    ));
    registry.register(CheckerDescriptor::new(
        SmellKind::Casing,
        [ColumnType::String],
        "casing_v2",
    ));

    assert_eq!(
        registry.get_checks_for_type(ColumnType::String)[&SmellKind::Casing],
        CheckerId::new("casing_v2")
    );
    assert_eq!(
        registry.smell_kind_of(&CheckerId::new("casing_v2")),
        Some(SmellKind::Casing)
    );
}
