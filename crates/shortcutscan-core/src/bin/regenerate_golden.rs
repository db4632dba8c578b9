//! Rewrites `tests/golden/<case>/expected_report.json` from `input.vdf`.
//!
//! Run from the repository root. Optional arguments restrict the run to the
//! named cases. A `gameprocess_log.txt` next to the input is applied.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use shortcutscan_core::{Report, ScanOptions, scan_shortcuts_file};

const GOLDEN_ROOT: &str = "tests/golden";
const INPUT: &str = "input.vdf";
const LOG: &str = "gameprocess_log.txt";
const EXPECTED: &str = "expected_report.json";

fn main() -> ExitCode {
    let only: Vec<String> = std::env::args().skip(1).collect();
    match golden_cases(Path::new(GOLDEN_ROOT), &only) {
        Ok(cases) if cases.is_empty() => {
            eprintln!("error: no golden cases under {GOLDEN_ROOT}");
            ExitCode::from(1)
        }
        Ok(cases) => {
            for case in &cases {
                match regenerate(case) {
                    Ok(report) => println!(
                        "{}: {} record(s), {} shortcut(s)",
                        case.display(),
                        report.records.len(),
                        report.shortcuts.len()
                    ),
                    Err(err) => {
                        eprintln!("error: {err}");
                        return ExitCode::from(1);
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn golden_cases(root: &Path, only: &[String]) -> Result<Vec<PathBuf>, String> {
    let dir = fs::read_dir(root).map_err(|err| format!("cannot list {}: {err}", root.display()))?;
    let mut cases = Vec::new();
    for entry in dir {
        let case = entry
            .map_err(|err| format!("cannot list {}: {err}", root.display()))?
            .path();
        let selected = only.is_empty()
            || case
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| only.iter().any(|wanted| wanted == name));
        if selected && case.join(INPUT).is_file() {
            cases.push(case);
        }
    }
    cases.sort();
    Ok(cases)
}

fn regenerate(case: &Path) -> Result<Report, String> {
    let input = case.join(INPUT);
    let log = case.join(LOG);
    let options = ScanOptions {
        gameprocess_log: log.is_file().then_some(log),
    };
    let mut report = scan_shortcuts_file(&input, &options)
        .map_err(|err| format!("{}: {err}", input.display()))?;
    // Keep the label stable across platforms.
    report.input.path = input.to_string_lossy().replace('\\', "/");

    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("{}: {err}", input.display()))?;
    json.push('\n');
    let output = case.join(EXPECTED);
    fs::write(&output, json).map_err(|err| format!("cannot write {}: {err}", output.display()))?;
    Ok(report)
}
