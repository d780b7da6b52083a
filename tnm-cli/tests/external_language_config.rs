//! Integration tests for external language configuration

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VALID_CONFIG: &str = r#"
[metadata]
code = "xx"
name = "Minimal"

[tokenizer]
prefixes = ['\(']
suffixes = ['\)', ',', '\.', ':']

[exceptions]
literals = []

[boundary]
word_continuation = "bdfghjklmnqstvwxz"
"#;

/// Test validating a valid configuration
#[test]
fn test_validate_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("valid.toml");
    fs::write(&config_path, VALID_CONFIG).unwrap();

    Command::cargo_bin("tnm")
        .unwrap()
        .args(["validate", "-c"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Language code: xx"));
}

/// Test validating a configuration with a broken pattern
#[test]
fn test_validate_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(&config_path, VALID_CONFIG.replace(r"'\('", "'('")).unwrap();

    Command::cargo_bin("tnm")
        .unwrap()
        .args(["validate", "-c"])
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

/// Test extracting with an external configuration
#[test]
fn test_extract_with_external_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    let input_path = temp_dir.path().join("input.txt");
    fs::write(&config_path, VALID_CONFIG).unwrap();
    fs::write(&input_path, "Befund: (pT3, pN2).").unwrap();

    Command::cargo_bin("tnm")
        .unwrap()
        .args(["extract", "-q", "-f", "json", "-c"])
        .arg(&config_path)
        .arg("-i")
        .arg(&input_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""language": "xx""#))
        .stdout(predicate::str::contains(r#""value": "T3""#));
}

/// Test that built-in language and external file are mutually exclusive
#[test]
fn test_language_conflicts_with_config() {
    Command::cargo_bin("tnm")
        .unwrap()
        .args(["extract", "-l", "en", "-c", "custom.toml", "-i", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
