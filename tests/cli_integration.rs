//! CLI integration tests for metadoc
//!
//! These drive the `metadoc` binary as a pipeline stage: reading a source
//! file or piped stdin, and routing the result to files or stdout.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the metadoc binary, isolated from the
/// caller's environment
fn metadoc_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("metadoc"));
    cmd.current_dir(dir.path())
        .env_remove("npm_lifecycle_script")
        .env_remove("METADOC_VERBOSE")
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"));
    cmd
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

// =============================================================================
// Source File Tests
// =============================================================================

#[test]
fn test_source_file_is_overwritten() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "fixture.json", r#"{"a":1}"#);

    metadoc_cmd(&dir)
        .args(["--source", "./fixture.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(dir.path().join("fixture.json")).unwrap();
    assert_eq!(written, "{\n  \"a\": 1\n}");
}

#[test]
fn test_toml_source_module() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "docs.toml", "title = \"Guide\"\n");

    metadoc_cmd(&dir)
        .args(["--source", "docs.toml", "--output", "out.json"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"title": "Guide"}));
}

// =============================================================================
// Stdin Tests
// =============================================================================

#[test]
fn test_piped_input_with_log_noise() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .write_stdin("LOG: starting\n{\"a\":1}\nLOG: done")
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");
}

#[test]
fn test_garbage_input_is_diagnosed() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .write_stdin("this is not json")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Source snippet"))
        .stderr(predicate::str::contains("^"))
        .stderr(predicate::function(|err: &str| {
            err.matches("expected value").count() == 1
        }));

    let logged = fs::read_to_string(dir.path().join("metadoc-source.log")).unwrap();
    assert_eq!(logged, "this is not json");
}

#[test]
fn test_piped_array_passes_through() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .write_stdin("[{\"a\":1},{\"b\":2}]")
        .assert()
        .success()
        .stdout("[\n  {\n    \"a\": 1\n  },\n  {\n    \"b\": 2\n  }\n]\n");
}

#[test]
fn test_empty_input_reports_no_source() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No source available"));

    assert!(!dir.path().join("metadoc-source.log").exists());
}

// =============================================================================
// Output Routing Tests
// =============================================================================

#[test]
fn test_output_directory_receives_api_json() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .args(["--output", "docs/generated"])
        .write_stdin("{\"a\":1}")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(dir.path().join("docs/generated/api.json")).unwrap();
    assert_eq!(written, "{\n  \"a\": 1\n}");
}

#[test]
fn test_output_json_file_is_used_as_is() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .args(["--output", "site/reference.json"])
        .write_stdin("{\"a\":1}")
        .assert()
        .success();

    assert!(dir.path().join("site/reference.json").is_file());
    assert!(!dir.path().join("site/reference.json/api.json").exists());
}

#[test]
fn test_output_directory_conflict() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "docs", "a plain file");

    metadoc_cmd(&dir)
        .args(["--output", "docs"])
        .write_stdin("{\"a\":1}")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));

    assert_eq!(fs::read_to_string(dir.path().join("docs")).unwrap(), "a plain file");
}

#[test]
fn test_lifecycle_script_output_fallback() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .env("npm_lifecycle_script", "producer | metadoc --output ./docs")
        .write_stdin("{\"a\":1}")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("docs/api.json").is_file());
}

#[test]
fn test_config_default_filename() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "metadoc.toml", "default_filename = \"reference.json\"\n");

    metadoc_cmd(&dir)
        .args(["--output", "out"])
        .write_stdin("{\"a\":1}")
        .assert()
        .success();

    assert!(dir.path().join("out/reference.json").is_file());
}

// =============================================================================
// Pipe Tests
// =============================================================================

#[test]
fn test_non_terminal_stage_echoes() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "fixture.json", r#"{"a":1}"#);

    metadoc_cmd(&dir)
        .env("npm_lifecycle_script", "metadoc --source fixture.json | render-html")
        .args(["--source", "fixture.json"])
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");

    // Piped stages leave their source file alone
    assert_eq!(
        fs::read_to_string(dir.path().join("fixture.json")).unwrap(),
        r#"{"a":1}"#
    );
}

#[test]
fn test_non_terminal_stage_with_output_does_both() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .env("npm_lifecycle_script", "producer | metadoc --output api.json | render-html")
        .args(["--output", "api.json"])
        .write_stdin("{\"a\":1}")
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");

    assert!(dir.path().join("api.json").is_file());
}

// =============================================================================
// Manifest and Verbose Tests
// =============================================================================

#[test]
fn test_manifest() {
    let dir = TempDir::new().unwrap();

    let output = metadoc_cmd(&dir).arg("--manifest").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "metadoc");
    assert_eq!(json["operations"], serde_json::json!(["process"]));
}

#[test]
fn test_verbose_goes_to_stderr() {
    let dir = TempDir::new().unwrap();

    metadoc_cmd(&dir)
        .arg("--verbose")
        .write_stdin("{\"a\":1}")
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n")
        .stderr(predicate::str::contains("[verbose:lifecycle]"));
}
