use std::ffi::OsStr;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("shortcutscan"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden(case: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(case)
}

fn sample_shortcuts() -> std::path::PathBuf {
    golden("basic").join("input.vdf")
}

fn corrupted_shortcuts() -> std::path::PathBuf {
    golden("corrupted").join("input.vdf")
}

fn stdout_json(args: &[&OsStr]) -> Value {
    let assert = cmd().args(args).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_supports_decode_and_parse() {
    cmd().arg("vdf").arg("decode").arg("--help").assert().success();
    cmd().arg("vdf").arg("parse").arg("--help").assert().success();
    cmd().arg("vdf").arg("list").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.vdf");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn wrong_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("shortcuts.bin");
    std::fs::write(&input, std::fs::read(sample_shortcuts()).expect("fixture")).expect("copy");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_json() {
    let input = sample_shortcuts();
    let value = stdout_json(&[
        OsStr::new("vdf"),
        OsStr::new("decode"),
        input.as_os_str(),
        OsStr::new("--stdout"),
    ]);
    assert_eq!(value["report_version"], 1);
    assert_eq!(value["shortcuts"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["shortcuts"][0]["name"], "RetroArch");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_is_written_with_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("nested").join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: 2 shortcut(s) decoded"));

    let json = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["records"].as_array().map(Vec::len), Some(2));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(corrupted_shortcuts())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::is_empty());
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("shortcuts.vdf");
    std::fs::write(&input, std::fs::read(sample_shortcuts()).expect("fixture")).expect("copy");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn empty_input_fails_decode() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("shortcuts.vdf");
    std::fs::write(&input, b"").expect("write");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("no field marker").and(contains("hint:")));
}

#[test]
fn truncated_input_succeeds_without_strict() {
    let input = corrupted_shortcuts();
    let value = stdout_json(&[
        OsStr::new("vdf"),
        OsStr::new("decode"),
        input.as_os_str(),
        OsStr::new("--stdout"),
    ]);
    assert_eq!(value["records"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["diagnostics"]["truncation"]["key"], "LastPlayTime");
}

#[test]
fn strict_fails_when_truncated() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(corrupted_shortcuts())
        .arg("-o")
        .arg(&report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("input truncated inside integer field 'LastPlayTime'"));
    assert!(report.exists());
}

#[test]
fn strict_passes_on_clean_input() {
    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn gameprocess_log_backfills_last_played() {
    let input = sample_shortcuts();
    let log = golden("basic").join("gameprocess_log.txt");
    let value = stdout_json(&[
        OsStr::new("vdf"),
        OsStr::new("decode"),
        input.as_os_str(),
        OsStr::new("--stdout"),
        OsStr::new("--gameprocess-log"),
        log.as_os_str(),
    ]);
    assert_eq!(value["shortcuts"][0]["last_played"], 1_700_474_400u64);
}

#[test]
fn missing_gameprocess_log_is_reported() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("--stdout")
        .arg("--gameprocess-log")
        .arg(temp.path().join("gameprocess_log.txt"))
        .assert()
        .failure()
        .stderr(contains("game-process log not found"));
}

#[test]
fn list_shortcuts_outputs_names() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("-o")
        .arg(report)
        .arg("--list-shortcuts")
        .assert()
        .success()
        .stderr(contains("Shortcuts:").and(contains("RetroArch")));
}

#[test]
fn list_prints_one_line_per_shortcut() {
    let assert = cmd()
        .arg("vdf")
        .arg("list")
        .arg(sample_shortcuts())
        .assert()
        .success()
        .stdout(contains("RetroArch\tsteam://rungameid/14829735428386455552"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn list_tolerates_undecodable_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("shortcuts.vdf");
    std::fs::write(&input, b"\x00shortcuts\x00").expect("write");

    cmd()
        .arg("vdf")
        .arg("list")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicates::str::is_empty())
        .stderr(contains("no shortcuts found"));
}

#[test]
fn glob_matching_many_files_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    for name in ["a.vdf", "b.vdf"] {
        std::fs::write(temp.path().join(name), b"\x08").expect("write");
    }
    let pattern = temp.path().join("*.vdf");

    cmd()
        .arg("vdf")
        .arg("list")
        .arg(pattern)
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn verbose_logs_resolved_input() {
    cmd()
        .env_remove("SHORTCUTSCAN_LOG")
        .arg("-v")
        .arg("vdf")
        .arg("list")
        .arg(sample_shortcuts())
        .assert()
        .success()
        .stderr(contains("resolved input").and(contains("shortcuts collected")));
}

#[test]
fn default_verbosity_hides_debug_events() {
    cmd()
        .env_remove("SHORTCUTSCAN_LOG")
        .arg("vdf")
        .arg("list")
        .arg(sample_shortcuts())
        .assert()
        .success()
        .stderr(contains("resolved input").not());
}

#[test]
fn strict_failure_is_logged_as_warning() {
    cmd()
        .env_remove("SHORTCUTSCAN_LOG")
        .arg("vdf")
        .arg("decode")
        .arg(corrupted_shortcuts())
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("strict mode rejects truncated input"));
}

#[test]
fn pretty_and_compact_select_layout() {
    let pretty = cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("--stdout")
        .arg("--pretty")
        .assert()
        .success();
    let pretty = String::from_utf8(pretty.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(pretty.lines().count() > 1);

    let compact = cmd()
        .arg("vdf")
        .arg("decode")
        .arg(sample_shortcuts())
        .arg("--stdout")
        .arg("--compact")
        .assert()
        .success();
    let compact = String::from_utf8(compact.get_output().stdout.clone()).expect("utf8 stdout");
    assert_eq!(compact.lines().count(), 1);
}
