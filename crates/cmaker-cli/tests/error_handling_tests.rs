//! Tests for error handling, suggestions and exit codes.

use std::fs;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources");

fn cmaker(cwd: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("cmaker");
    cmd.current_dir(cwd.path())
        .env_clear()
        .env("XDG_CONFIG_HOME", cwd.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn unknown_feature_is_not_found() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["--data-dir", DATA_DIR, "new", "-n", "demo", "--features", "network"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Feature 'network' is not available"))
        .stderr(predicate::str::contains("cmaker list"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn unsupported_standard_is_not_found() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["--data-dir", DATA_DIR, "new", "-n", "demo", "--std", "11"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Standard 11"));
}

#[test]
fn unknown_language_is_not_found() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["--data-dir", DATA_DIR, "list", "--lang", "rust"])
        .assert()
        .code(3);
}

#[test]
fn existing_project_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("demo")).unwrap();
    fs::write(temp.path().join("demo/notes.txt"), "keep me").unwrap();

    cmaker(&temp)
        .args(["--data-dir", DATA_DIR, "new", "-n", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(temp.path().join("demo/notes.txt")).unwrap(),
        "keep me"
    );
    assert!(!temp.path().join("demo/CMakeLists.txt").exists());
}

#[test]
fn invalid_project_name_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["--data-dir", DATA_DIR, "new", "-n", "a/b"])
        .assert()
        .code(2);
}

#[test]
fn missing_catalog_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();

    cmaker(&temp)
        .arg("--data-dir")
        .arg(empty.path())
        .args(["new", "-n", "demo"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("languages.json"))
        .stderr(predicate::str::contains("--data-dir"));
}

#[test]
fn data_dir_is_read_from_environment() {
    let temp = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();

    cmaker(&temp)
        .env("CMAKER_DATA_DIR", empty.path())
        .args(["list"])
        .assert()
        .code(4);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["config", "get", "defaults.architecture"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_name_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["new", "library"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn verbose_shows_error_chain() {
    let temp = TempDir::new().unwrap();
    cmaker(&temp)
        .args(["-v", "--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Caused by").or(predicate::str::contains("→")))
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
