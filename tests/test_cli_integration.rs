//! CLI Integration Tests for reposcraper
//!
//! These tests execute the binary and verify correct behavior for:
//! - JSON array and aggregated output
//! - Configuration file handling
//! - Error handling

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test checkout with C# and Python files
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::create_dir_all(temp_dir.path().join("bin/Debug")).unwrap();

    fs::write(
        temp_dir.path().join("src/Calculator.cs"),
        r#"namespace Demo
{
    public class Calculator
    {
        // Adds two numbers
        public int Add(int a, int b)
        {
            return a + b;
        }

        public int Square(int x) => x * x;
    }
}
"#,
    )
    .unwrap();

    fs::write(
        temp_dir.path().join("bin/Debug/Generated.cs"),
        "public class Generated\n{\n    public void Noise()\n    {\n    }\n}\n",
    )
    .unwrap();

    fs::write(
        temp_dir.path().join("src/tools.py"),
        "# Greets someone\ndef greet(name):\n    return 'hi ' + name\n",
    )
    .unwrap();

    temp_dir
}

fn cmd() -> Command {
    Command::cargo_bin("reposcraper").unwrap()
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--aggregate"));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_csharp_array_to_stdout() {
    let project = create_test_project();

    let output = cmd()
        .arg(project.path())
        .args(["--language", "csharp", "--repo", "demo", "--owner", "acme"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["type"], "method");
    assert_eq!(records[0]["signature"], "public int Add(int a, int b)");
    assert_eq!(records[0]["comments"], "        // Adds two numbers");
    assert_eq!(records[0]["sourceFile"]["path"], "src/Calculator.cs");
    assert_eq!(records[0]["sourceFile"]["repository"], "demo");
    assert_eq!(records[0]["sourceFile"]["owner"], "acme");
    assert_eq!(records[1]["body"], "=> x * x;");
}

#[test]
fn test_python_language_alias() {
    let project = create_test_project();

    cmd()
        .arg(project.path())
        .args(["-l", "py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("def greet(name):"))
        .stdout(predicate::str::contains("# Greets someone"))
        .stdout(predicate::str::contains("Calculator").not());
}

#[test]
fn test_aggregated_output_file() {
    let project = create_test_project();
    let out = project.path().join("results/all.json");

    cmd()
        .arg(project.path())
        .args(["--language", "c#", "--aggregate", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 methods"));

    let doc: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["totalItems"], 2);
    assert!(doc["timeStamp"].is_string());
    assert_eq!(doc["results"][0]["code"]["signature"], "public int Add(int a, int b)");
}

#[test]
fn test_array_output_file_in_new_directory() {
    let project = create_test_project();
    let out = project.path().join("out/nested/methods.json");

    cmd()
        .arg(project.path())
        .args(["--language", "python", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 1 methods"));

    let records: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records[0]["signature"], "def greet(name):");
}

#[test]
fn test_config_file_ignore_override() {
    let project = create_test_project();
    fs::write(
        project.path().join(".reposcraper_config.json"),
        r#"{"ignore": []}"#,
    )
    .unwrap();

    cmd()
        .arg(project.path())
        .args(["--language", "csharp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Noise"));
}

#[test]
fn test_invalid_config_file() {
    let project = create_test_project();
    let config = project.path().join("custom.json");
    fs::write(&config, r#"{"tab_width": 0}"#).unwrap();

    cmd()
        .arg(project.path())
        .args(["--language", "python", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tab_width"));
}

#[test]
fn test_unknown_language() {
    let project = create_test_project();

    cmd()
        .arg(project.path())
        .args(["--language", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cobol"));
}

#[test]
fn test_missing_directory() {
    cmd()
        .args(["/definitely/not/a/dir", "--language", "csharp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_language_is_required() {
    let project = create_test_project();
    cmd().arg(project.path()).assert().failure();
}
