//! End-to-end tests that run the compiled `extctl` binary with assert_cmd.

use assert_cmd::Command;
use ext_test_utils::TestManifest;
use predicates::prelude::*;

const CHAIN: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../test-fixtures/extensions/chain.toml"
);
const CHAIN_YAML: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../test-fixtures/extensions/chain.yaml"
);
const CONFLICTS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../test-fixtures/extensions/conflicts.toml"
);
const CYCLE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../test-fixtures/extensions/cycle.toml"
);

fn extctl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("extctl"));
    cmd.env_remove("EXTCTL_FILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("failed to run extctl");
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ============================================================================
// Help and startup
// ============================================================================

#[test]
fn test_help_output() {
    extctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check-order"))
        .stdout(predicate::str::contains("check-value"));
}

#[test]
fn test_no_command_prints_hint() {
    extctl()
        .assert()
        .success()
        .stdout(predicate::str::contains("extctl --help"));
}

#[test]
fn test_missing_manifest_file() {
    extctl()
        .args(["-f", "/nonexistent/extensions.toml", "solve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_file_from_environment() {
    extctl()
        .env("EXTCTL_FILE", CHAIN)
        .args(["solve", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("standalone"));
}

// ============================================================================
// solve / deps / rdeps
// ============================================================================

#[test]
fn test_solve_json_layers() {
    let layers = stdout_json(extctl().args(["-f", CHAIN, "solve", "--json"]));
    assert_eq!(
        layers,
        serde_json::json!([["framework", "standalone"], ["mod1"], ["mod2"], ["mod3"]])
    );
}

#[test]
fn test_solve_extensions_only_drops_external() {
    let layers = stdout_json(extctl().args(["-f", CHAIN, "solve", "--extensions-only", "--json"]));
    assert_eq!(
        layers,
        serde_json::json!([["standalone"], ["mod1"], ["mod2"], ["mod3"]])
    );
}

#[test]
fn test_solve_text_lists_external() {
    extctl()
        .args(["-f", CHAIN, "solve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 layers"))
        .stdout(predicate::str::contains("framework"));
}

#[test]
fn test_solve_yaml_manifest() {
    let layers = stdout_json(extctl().args(["-f", CHAIN_YAML, "solve", "--json"]));
    assert_eq!(layers, serde_json::json!([["framework"], ["mod1"], ["mod2"]]));
}

#[test]
fn test_solve_cycle_fails() {
    extctl()
        .args(["-f", CYCLE, "solve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dependency cycle detected among: a, b"));
}

#[test]
fn test_deps_json() {
    let layers = stdout_json(extctl().args(["-f", CHAIN, "deps", "mod2", "--json"]));
    assert_eq!(layers, serde_json::json!([["framework"], ["mod1"], ["mod2"]]));
}

#[test]
fn test_deps_unknown_extension() {
    extctl()
        .args(["-f", CHAIN, "deps", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_rdeps_direct_and_transitive() {
    let direct = stdout_json(extctl().args(["-f", CHAIN, "rdeps", "mod2", "--json"]));
    assert_eq!(direct["dependents"], serde_json::json!(["mod3"]));

    let transitive = stdout_json(extctl().args(["-f", CHAIN, "rdeps", "mod1", "-t", "--json"]));
    assert_eq!(transitive["transitive"], serde_json::json!(true));
    assert_eq!(transitive["dependents"], serde_json::json!(["mod2", "mod3"]));
}

#[test]
fn test_rdeps_nothing_depends() {
    extctl()
        .args(["-f", CHAIN, "rdeps", "standalone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing depends on"));
}

// ============================================================================
// check-order / check-value / plan
// ============================================================================

#[test]
fn test_check_order_reports_conflict() {
    extctl()
        .args(["-f", CONFLICTS, "check-order"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("CONFLICTS"))
        .stdout(predicate::str::contains(
            "required value (for \"mod1.feature1\") by mod3 conflicts with specifications of mod2",
        ))
        .stderr(predicate::str::contains("1 configuration conflict(s) found"));
}

#[test]
fn test_check_order_subset_is_ok() {
    extctl()
        .args(["-f", CONFLICTS, "check-order", "mod1", "mod2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_check_order_json() {
    let verdict = stdout_json(extctl().args(["-f", CONFLICTS, "check-order", "--json"]));
    assert_eq!(verdict["status"], "CONFLICTS");
    assert_eq!(verdict["conflicts"][0]["extension"], "mod3");
    assert_eq!(verdict["conflicts"][0]["url"], "mod1.feature1");
}

#[test]
fn test_check_value_illegal() {
    extctl()
        .args(["-f", CONFLICTS, "check-value", "mod1.feature1", "40", "-a", "mod2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("illegal"))
        .stdout(predicate::str::contains(
            "value (40) does not match the value (30) required by mod2",
        ));
}

#[test]
fn test_check_value_ok() {
    let verdict = stdout_json(extctl().args([
        "-f",
        CONFLICTS,
        "check-value",
        "mod1.feature1",
        "30",
        "--active",
        "mod2",
        "--json",
    ]));
    assert_eq!(verdict["status"], "OK");
}

#[test]
fn test_check_value_out_of_spec_range() {
    let verdict = stdout_json(extctl().args([
        "-f",
        CONFLICTS,
        "check-value",
        "mod1.feature1",
        "150",
        "--active",
        "mod1",
        "--json",
    ]));
    assert_eq!(verdict["status"], "illegal");
    assert_eq!(verdict["by"], "spec");
}

#[test]
fn test_check_value_all_collects_every_violation() {
    let violations = stdout_json(extctl().args([
        "-f",
        CONFLICTS,
        "check-value",
        "mod1.feature1",
        "40",
        "--all",
        "--json",
    ]));
    let by: Vec<_> = violations
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["by"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(by, vec!["mod2", "mod3"]);
}

#[test]
fn test_check_value_unknown_option() {
    extctl()
        .args(["-f", CONFLICTS, "check-value", "mod1.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No extension publishes option 'mod1.nope'"));
}

#[test]
fn test_plan_activates_dependencies_first() {
    let snapshot = stdout_json(extctl().args(["-f", CONFLICTS, "plan", "mod3", "--json"]));
    assert_eq!(snapshot["load_order"], serde_json::json!(["mod1", "mod3"]));
    assert_eq!(snapshot["values"]["mod1.feature1"], serde_json::json!(50.0));
    assert_eq!(snapshot["values"]["mod1.feature2"], "A");
}

#[test]
fn test_plan_refuses_conflicting_extension() {
    extctl()
        .args(["-f", CONFLICTS, "plan", "mod2", "mod3"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot activate 'mod3'"))
        .stderr(predicate::str::contains("conflict"));
}

#[test]
fn test_plan_with_generated_manifest() {
    let manifest = TestManifest::toml(
        r#"
[[extension]]
name = "base"
version = "1.0.0"

[[extension]]
name = "addon"
version = "1.0.0"
dependencies = ["base"]
"#,
    );
    extctl()
        .args(["-f"])
        .arg(manifest.path())
        .args(["plan", "addon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. base"))
        .stdout(predicate::str::contains("2. addon"));
}
