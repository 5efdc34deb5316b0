//! Scenario tests across the model, resolver and permission crates.
//!
//! Each test builds its extensions in code and checks one end-to-end
//! behavior: layer ordering, value classification, order validation and
//! session activation.

use ext_model::{ConfigDemand, Extension, OptionSpec, OptionValue};
use ext_permissions::{
    ConfigSession, OrderStatus, PermissionStatus, is_all_valid_extension_config_order,
    is_value_permitted,
};
use ext_resolver::{Error as ResolverError, ExtensionDependencySolver};
use ext_test_utils::extension;
use pretty_assertions::assert_eq;

fn layers(names: &[&[&str]]) -> Vec<Vec<String>> {
    names
        .iter()
        .map(|layer| layer.iter().map(|s| s.to_string()).collect())
        .collect()
}

// =============================================================================
// Dependency ordering
// =============================================================================

#[test]
fn scenario_single_dependency() {
    let a = extension("A").depends_on("B").build();
    let b = extension("B").build();
    let solver = ExtensionDependencySolver::new([&a, &b]).unwrap();
    assert_eq!(solver.solve().unwrap(), layers(&[&["B"], &["A"]]));
}

#[test]
fn scenario_independent_dependencies_share_a_layer() {
    let a = extension("A").depends_on("B").depends_on("C").build();
    let b = extension("B").build();
    let c = extension("C").build();
    // Input order must not leak into a layer.
    let solver = ExtensionDependencySolver::new([&a, &c, &b]).unwrap();
    assert_eq!(solver.solve().unwrap(), layers(&[&["B", "C"], &["A"]]));
}

#[test]
fn scenario_cycle_is_reported() {
    let a = extension("A").depends_on("B").build();
    let b = extension("B").depends_on("A >= 1.0.0").build();
    let solver = ExtensionDependencySolver::new([&a, &b]).unwrap();
    match solver.solve() {
        Err(ResolverError::CyclicDependency { participants }) => {
            assert_eq!(participants, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

// =============================================================================
// Value classification
// =============================================================================

#[test]
fn scenario_suggested_number_gives_warning() {
    let spec = OptionSpec::number("test.hello", 0.0);
    let config = extension("other").suggests("test.hello", 10).build();
    let verdict = is_value_permitted(&OptionValue::from(1), &spec, &[&config]);
    assert_eq!(verdict.status, PermissionStatus::Warning);
    assert_eq!(verdict.by, "other");
}

#[test]
fn scenario_required_choice() {
    let spec = OptionSpec::choice("test4.choice1", ["A", "B", "C"]);
    let config = extension("other").requires("test4.choice1", "A").build();

    let accepted = is_value_permitted(&OptionValue::from("A"), &spec, &[&config]);
    assert_eq!(accepted.status, PermissionStatus::Ok);

    let refused = is_value_permitted(&OptionValue::from("B"), &spec, &[&config]);
    assert_eq!(refused.status, PermissionStatus::Illegal);
}

// =============================================================================
// Order validation and sessions
// =============================================================================

fn mod1() -> Extension {
    extension("mod1")
        .option(OptionSpec::number("mod1.feature1", 20.0).with_range(0.0, 100.0))
        .build()
}

#[test]
fn scenario_conflicting_required_values() {
    let ext30 = extension("ext30")
        .depends_on("mod1")
        .requires("mod1.feature1", 30)
        .build();
    let ext50 = extension("ext50")
        .depends_on("mod1")
        .requires("mod1.feature1", 50)
        .build();

    let verdict = is_all_valid_extension_config_order(&[mod1(), ext30, ext50]).unwrap();
    assert_eq!(verdict.status, OrderStatus::Conflicts);
    assert_eq!(verdict.conflicts[0].extension, "ext50");
}

#[test]
fn scenario_disjoint_required_ranges() {
    let low = extension("low")
        .depends_on("mod1")
        .demand("mod1.feature1", ConfigDemand::new().with_required_range(0.0, 10.0))
        .build();
    let high = extension("high")
        .depends_on("mod1")
        .demand("mod1.feature1", ConfigDemand::new().with_required_range(20.0, 30.0))
        .build();

    let verdict = is_all_valid_extension_config_order(&[mod1(), low, high]).unwrap();
    assert_eq!(verdict.status, OrderStatus::Conflicts);
    assert_eq!(verdict.conflicts[0].extension, "high");
    assert_eq!(verdict.conflicts[0].verdict.by, "low");
}

#[test]
fn scenario_session_refuses_second_requirement() {
    let ext40 = extension("ext40")
        .depends_on("mod1")
        .requires("mod1.feature1", 40)
        .build();
    let ext60 = extension("ext60")
        .depends_on("mod1")
        .requires("mod1.feature1", 60)
        .build();
    let mut session = ConfigSession::new(vec![mod1(), ext40, ext60]).unwrap();

    assert!(session.activate_with_dependencies("ext40").unwrap().is_ok());
    assert_eq!(session.value("mod1.feature1").unwrap(), OptionValue::from(40));

    let refused = session.activate_with_dependencies("ext60").unwrap();
    assert_eq!(refused.status, OrderStatus::Conflicts);
    assert!(!session.is_active("ext60"));
    assert_eq!(session.load_order(), ["mod1", "ext40"]);
    assert_eq!(session.value("mod1.feature1").unwrap(), OptionValue::from(40));
}

#[test]
fn scenario_deactivation_takes_dependents_along() {
    let ext40 = extension("ext40")
        .depends_on("mod1")
        .demand("mod1.feature1", ConfigDemand::new().with_required_range(30.0, 50.0))
        .build();
    let mut session = ConfigSession::new(vec![mod1(), ext40]).unwrap();
    session.activate_with_dependencies("ext40").unwrap();

    let removed = session.deactivate("mod1").unwrap();
    assert_eq!(removed, vec!["mod1".to_string(), "ext40".to_string()]);
    assert!(session.load_order().is_empty());
    assert_eq!(session.value("mod1.feature1").unwrap(), OptionValue::from(20));
}
