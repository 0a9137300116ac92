use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn cargo_bin() -> &'static str {
    "promptfix"
}

const SCENARIO: &str = "[{\"a\":1}\n  [\n    {\"b\":2}\n  ]\n]";

fn write_prompts(root: &Path, content: &str) -> PathBuf {
    let data = root.join("server").join("data");
    fs::create_dir_all(&data).unwrap();
    let path = data.join("prompts.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn cli_fixes_default_path() {
    let dir = tempdir().unwrap();
    let input = write_prompts(dir.path(), SCENARIO);
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON is valid! Found 2 prompts"))
        .stdout(predicate::str::contains(
            "Successfully fixed and formatted prompts.json",
        ));
    let s = fs::read_to_string(&input).unwrap();
    let v: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v, serde_json::json!([{"a": 1}, {"b": 2}]));
    assert!(s.starts_with("[\n  {\n    \"a\": 1"));
}

#[test]
fn cli_explicit_input_still_invalid() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "").unwrap();
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON is still invalid:"))
        .stdout(predicate::str::contains("Error at position 0"))
        .stdout(predicate::str::contains(
            "Saved partially fixed content to prompts-partial-fix.json",
        ));
    assert_eq!(fs::read_to_string(&input).unwrap(), "");
    assert!(dir.path().join("prompts-partial-fix.json").exists());
}

#[test]
fn cli_partial_output_flag() {
    let dir = tempdir().unwrap();
    let input = write_prompts(dir.path(), "[1,\n  x]");
    let partial = dir.path().join("review.json");
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .args([
            input.to_str().unwrap(),
            "--partial-output",
            partial.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error at position 6"))
        .stdout(predicate::str::contains("review.json"));
    assert_eq!(fs::read_to_string(&partial).unwrap(), "[1,\n  x]");
}

#[test]
fn cli_indent_and_ensure_ascii() {
    let dir = tempdir().unwrap();
    let input = write_prompts(dir.path(), "[{\"t\":\"é\"}]");
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .args(["--indent", "4", "--ensure-ascii", input.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        "[\n    {\n        \"t\": \"\\u00e9\"\n    }\n]"
    );
}

#[test]
fn cli_verbose_logs_substitutions() {
    let dir = tempdir().unwrap();
    let input = write_prompts(dir.path(), SCENARIO);
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .args(["-v", input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("[nested-array-wrapper] at 7"))
        .stderr(predicate::str::contains("[trailing-double-close] at 18"))
        .stderr(predicate::str::contains("nested-array-wrapper: 1 substitution(s)"));
}

#[test]
fn cli_missing_file_exits_non_zero() {
    let dir = tempdir().unwrap();
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: failed to read"))
        .stderr(predicate::str::contains("prompts.json"));
}

#[test]
fn cli_unknown_flag_is_usage_error() {
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .code(2);
}

#[test]
fn cli_scalar_document_is_fatal_and_untouched() {
    let dir = tempdir().unwrap();
    let input = write_prompts(dir.path(), "null");
    Command::cargo_bin(cargo_bin())
        .unwrap()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("top-level JSON value is a null"));
    assert_eq!(fs::read_to_string(&input).unwrap(), "null");
    assert!(!input.with_file_name("prompts-partial-fix.json").exists());
}
