//! End-to-end tests of the `appbundle` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn front_end() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "root.js", "export const Runtime = { cachedResources: new Map() };\n");
    write(root, "RuntimeInstantiator.js", "export function start() {}\n");
    write(
        root,
        "shell.json",
        r#"{"modules": [{"name": "core", "type": "autostart"}, {"name": "panel"}]}"#,
    );
    write(root, "shell.js", "");
    write(root, "core/module.json", r#"{"modules": ["core-legacy.js"]}"#);
    write(root, "core/core-legacy.js", "console.log(1)\n");
    write(root, "panel/module.json", r#"{"dependencies": ["core"], "resources": ["icon.svg"]}"#);
    write(root, "panel/icon.svg", "<svg/>");
    temp
}

fn appbundle() -> Command {
    let mut cmd = Command::cargo_bin("appbundle").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn test_missing_input_path_prints_usage() {
    appbundle()
        .args(["shell", "--output_path", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input_path"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_release_layout() {
    let input = front_end();
    let output = TempDir::new().unwrap();

    appbundle()
        .arg("shell")
        .arg("--input_path")
        .arg(input.path())
        .arg("--output_path")
        .arg(output.path())
        .arg("--rollup")
        .assert()
        .success()
        .stderr(predicate::str::contains("Rollup concatenation is accepted"))
        .stderr(predicate::str::contains("Release completed"));

    for file in ["shell.js", "panel/panel_module.js", "root.js", "RuntimeInstantiator.js"] {
        assert!(output.path().join(file).is_file(), "missing {}", file);
    }
    let shell = fs::read_to_string(output.path().join("shell.js")).unwrap();
    assert!(shell.contains("console.log(1)"));
}

#[test]
fn test_invariant_violation_exits_non_zero() {
    let input = front_end();
    write(
        input.path(),
        "broken.json",
        r#"{"modules": [{"name": "panel"}, {"name": "late", "type": "autostart"}]}"#,
    );
    write(input.path(), "broken.js", "");
    write(input.path(), "late/module.json", r#"{"dependencies": ["panel"]}"#);
    write(input.path(), "panel/module.json", "{}");
    let output = TempDir::new().unwrap();

    appbundle()
        .arg("broken")
        .arg("--input_path")
        .arg(input.path())
        .arg("--output_path")
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ Release failed"))
        .stderr(predicate::str::contains("late"))
        .stderr(predicate::str::contains("{panel}"));

    assert!(!output.path().join("broken.js").exists());
}

#[test]
fn test_quiet_build_with_config_file() {
    let input = front_end();
    write(input.path(), "appbundle.config.json", r#"{"minify": "none"}"#);
    let output = TempDir::new().unwrap();

    appbundle()
        .arg("shell")
        .arg("--input_path")
        .arg(input.path())
        .arg("--output_path")
        .arg(output.path())
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(output.path().join("RuntimeInstantiator.js")).unwrap(),
        "export function start() {}\n"
    );
}
