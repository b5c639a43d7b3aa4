use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn lintrc(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lintrc").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("LINTRC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn output_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "lintrc failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_defaults_only() {
    let dir = TempDir::new().unwrap();
    let config = output_json(&mut lintrc(dir.path()));

    assert_eq!(config["rules"]["no-debug"], json!(1));
    assert_eq!(config["options"]["formatter"], json!("stylish"));
}

#[test]
fn test_discovered_file_merges_with_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".lintrc.yml"), "rules:\n  no-debug: 2\n  custom-rule: 1\n").unwrap();
    let nested = dir.path().join("src").join("styles");
    fs::create_dir_all(&nested).unwrap();

    let config = output_json(lintrc(dir.path()).arg("-C").arg(&nested));

    assert_eq!(config["rules"]["no-debug"], json!(2));
    assert_eq!(config["rules"]["custom-rule"], json!(1));
    assert_eq!(config["rules"]["no-ids"], json!(1));
}

#[test]
fn test_rule_overrides() {
    let dir = TempDir::new().unwrap();
    let config = output_json(lintrc(dir.path()).args([
        "-r",
        "no-ids=0",
        "-r",
        "indentation=[2, {size: 4}]",
    ]));

    assert_eq!(config["rules"]["no-ids"], json!(0));
    assert_eq!(config["rules"]["indentation"], json!([2, {"size": 4}]));
}

#[test]
fn test_no_merge_default_rules() {
    let dir = TempDir::new().unwrap();
    let config =
        output_json(lintrc(dir.path()).args(["--no-merge-default-rules", "-r", "no-ids=2"]));

    assert_eq!(config["rules"], json!({"no-ids": 2}));
}

#[test]
fn test_explicit_config_and_manifest() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("lint")).unwrap();
    fs::write(
        dir.path().join("lint").join("manifest.yml"),
        "options:\n  merge-default-rules: false\nrules:\n  from-manifest: 1\n",
    )
    .unwrap();
    fs::write(dir.path().join("explicit.yml"), "rules:\n  from-explicit: 1\n").unwrap();
    fs::write(dir.path().join("package.json"), r#"{"lintConfig": "lint/manifest.yml"}"#).unwrap();

    let config = output_json(&mut lintrc(dir.path()));
    assert_eq!(config["rules"], json!({"from-manifest": 1}));

    let config = output_json(lintrc(dir.path()).args(["-c", "explicit.yml"]));
    assert_eq!(config["rules"]["from-explicit"], json!(1));
    assert!(config["rules"].get("from-manifest").is_none());
}

#[test]
fn test_yaml_output() {
    let dir = TempDir::new().unwrap();
    lintrc(dir.path())
        .args(["-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rules:"))
        .stdout(predicate::str::contains("no-debug: 1"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".lintrc.yml"), "rules: [1\n").unwrap();

    lintrc(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_invalid_rule_argument() {
    let dir = TempDir::new().unwrap();
    lintrc(dir.path())
        .args(["-r", "no-ids"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rule override"));
}
