use std::fs;
use std::path::{Path, PathBuf};

use shortcutscan_core::{Report, ScanOptions, scan_shortcuts_file};

fn golden_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_report(dir: &str) -> Report {
    let expected_path = golden_dir(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = golden_dir(dir);
    let input = root.join("input.vdf");
    let log = root.join("gameprocess_log.txt");
    let options = ScanOptions {
        gameprocess_log: log.exists().then_some(log),
    };
    let expected = load_expected_report(dir);

    let mut actual = scan_shortcuts_file(&input, &options).expect("scan shortcuts");
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_basic() {
    run_golden("tests/golden/basic");
}

#[test]
fn golden_corrupted() {
    run_golden("tests/golden/corrupted");
}

#[test]
fn golden_basic_backfills_last_played() {
    let report = load_expected_report("tests/golden/basic");
    assert_eq!(report.shortcuts[0].last_played, Some(1_700_474_400));
    assert_eq!(report.shortcuts[1].last_played, Some(1_700_000_000));
    assert_eq!(report.shortcuts[0].tags, ["Favorites", "Emulators"]);
}

#[test]
fn golden_corrupted_reports_truncation() {
    let report = load_expected_report("tests/golden/corrupted");
    assert_eq!(report.records.len(), 2);
    let truncation = report.diagnostics.truncation.expect("truncation");
    assert_eq!(truncation.key.as_str(), "LastPlayTime");
    assert_eq!(truncation.available, 2);
    assert_eq!(report.diagnostics.discarded_fields, 1);
}
