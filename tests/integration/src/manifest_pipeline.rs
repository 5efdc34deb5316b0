//! Manifest files through the whole stack: parse, order, validate, activate.

use ext_model::{ManifestSet, OptionValue};
use ext_permissions::{
    ConfigSession, OrderStatus, PermissionStatus, is_all_valid_extension_config_order,
};
use ext_resolver::ExtensionDependencySolver;
use ext_test_utils::TestManifest;
use pretty_assertions::assert_eq;

const GAME_SET: &str = r#"
[[extension]]
name = "engine"
version = "3.1.0"
dependencies = { runtime = ">= 2.0.0" }

[[extension.options]]
url = "quality"
type = "choice"
value = { default = "medium", choices = ["low", "medium", "high"] }

[[extension.options]]
url = "fps"
type = "number"
value = { default = 60, range = { min = 30, max = 240 } }

[[extension.options]]
url = "folders"
type = "set"
value = { default = ["saves/"] }

[[extension]]
name = "hd-pack"
version = "1.0.0"
dependencies = ["engine ^3"]

[extension.config.engine.quality.value]
required-values = ["medium", "high"]

[extension.config.engine.fps.value]
suggested-range = { min = 60, max = 144 }

[[extension]]
name = "potato-mode"
version = "0.9.0"
dependencies = ["engine"]

[extension.config.engine.quality.value]
required-value = "low"
"#;

#[test]
fn test_manifest_to_activation_layers() {
    let manifest = TestManifest::toml(GAME_SET);
    let extensions = ManifestSet::from_path(manifest.path())
        .unwrap()
        .into_extensions()
        .unwrap();
    let solver = ExtensionDependencySolver::new(&extensions).unwrap();

    assert_eq!(
        solver.solve().unwrap(),
        vec![
            vec!["runtime".to_string()],
            vec!["engine".to_string()],
            vec!["hd-pack".to_string(), "potato-mode".to_string()],
        ]
    );
    assert_eq!(solver.virtual_dependencies(), vec!["runtime".to_string()]);
}

#[test]
fn test_manifest_order_conflict() {
    let extensions = ManifestSet::from_toml(GAME_SET)
        .unwrap()
        .into_extensions()
        .unwrap();
    let verdict = is_all_valid_extension_config_order(&extensions).unwrap();

    assert_eq!(verdict.status, OrderStatus::Conflicts);
    assert_eq!(verdict.conflicts.len(), 1);
    assert_eq!(verdict.conflicts[0].extension, "potato-mode");
    assert_eq!(verdict.conflicts[0].url, "engine.quality");
}

#[test]
fn test_manifest_session_round_trip() {
    let extensions = ManifestSet::from_toml(GAME_SET)
        .unwrap()
        .into_extensions()
        .unwrap();
    let mut session = ConfigSession::new(extensions).unwrap();
    assert!(session.activate_with_dependencies("hd-pack").unwrap().is_ok());

    assert_eq!(session.value("engine.quality").unwrap(), OptionValue::from("medium"));

    // Only an OK verdict assigns; a warning leaves the value alone.
    let verdict = session
        .try_set_value("engine.fps", OptionValue::from(200))
        .unwrap();
    assert_eq!(verdict.status, PermissionStatus::Warning);
    assert!(!verdict.status.is_blocking());
    assert_eq!(session.value("engine.fps").unwrap(), OptionValue::from(60));
    session.set_value("engine.fps", OptionValue::from(200)).unwrap();
    assert_eq!(session.value("engine.fps").unwrap(), OptionValue::from(200));

    assert!(
        session
            .try_set_value("engine.quality", OptionValue::from("low"))
            .unwrap()
            .status
            .is_blocking()
    );

    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.load_order, vec!["engine", "hd-pack"]);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["values"]["engine.quality"], "medium");
    assert_eq!(json["values"]["engine.folders"], serde_json::json!(["saves/"]));
}

#[test]
fn test_yaml_manifest_next_to_toml() {
    let manifest = TestManifest::yaml(
        r#"
extensions:
  - name: engine
    version: 3.1.0
    options:
      - url: fps
        type: number
        value: { default: 60, range: { min: 30, max: 240 } }
  - name: vsync
    version: 1.0.0
    dependencies: [engine]
    config:
      engine.fps:
        value: { required-value: 60 }
"#,
    );
    assert!(manifest.path().starts_with(manifest.dir()));

    let extensions = ManifestSet::from_path(manifest.path())
        .unwrap()
        .into_extensions()
        .unwrap();
    assert!(extensions[0].option("engine.fps").is_some());
    assert_eq!(
        extensions[1].demand("engine.fps").unwrap().value.required_value,
        Some(OptionValue::from(60))
    );
    assert!(is_all_valid_extension_config_order(&extensions).unwrap().is_ok());
}
