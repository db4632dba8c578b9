use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use shortcutscan_core::{Report, ScanOptions, ShortcutEntry};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SHORTCUTSCAN_LOG";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("SHORTCUTSCAN_BUILD_COMMIT"),
    ", ",
    env!("SHORTCUTSCAN_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  shortcutscan vdf decode shortcuts.vdf -o report.json\n  shortcutscan vdf decode shortcuts.vdf --stdout --pretty\n  shortcutscan vdf list 'userdata/*/config/shortcuts.vdf'";

#[derive(Parser, Debug)]
#[command(name = "shortcutscan")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Recover non-store game shortcuts from a launcher's binary shortcuts.vdf.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); SHORTCUTSCAN_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on binary shortcuts.vdf files.
    Vdf {
        #[command(subcommand)]
        command: VdfCommands,
    },
}

#[derive(Subcommand, Debug)]
enum VdfCommands {
    /// Decode a shortcuts file and write a versioned JSON report.
    #[command(alias = "parse")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
    /// Print one line per shortcut; unreadable files list nothing.
    List(ListArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Path to a shortcuts.vdf file (a glob matching one file is accepted)
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the input ends inside an integer field
    #[arg(long)]
    strict: bool,

    /// Launcher game-process log used to backfill last played times
    #[arg(long, value_name = "PATH")]
    gameprocess_log: Option<PathBuf>,

    /// List decoded shortcuts after writing the report
    #[arg(long)]
    list_shortcuts: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Path to a shortcuts.vdf file (a glob matching one file is accepted)
    input: PathBuf,

    /// Launcher game-process log used to backfill last played times
    #[arg(long, value_name = "PATH")]
    gameprocess_log: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(
        &cli.command,
        Commands::Vdf {
            command: VdfCommands::Decode(DecodeArgs { quiet: true, .. })
        }
    );
    init_logging(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Vdf { command } => match command {
            VdfCommands::Decode(args) => cmd_vdf_decode(args),
            VdfCommands::List(args) => cmd_vdf_list(args),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, 0) => "error",
        (_, 0) => "warn",
        (_, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_vdf_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    debug!(input = %input_abs.display(), "resolved input");
    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let options = scan_options(args.gameprocess_log.as_deref())?;
    let rep = shortcutscan_core::scan_shortcuts_file(&resolved_input, &options)
        .map_err(|err| decode_failure(&resolved_input, err))?;
    let json = serialize_report(&rep, args.pretty && !args.compact)?;

    if let Some(report) = report {
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !args.quiet {
            eprintln!(
                "OK: {} shortcut(s) decoded -> {}",
                rep.shortcuts.len(),
                report.display()
            );
        }
    } else {
        print!("{}", json);
    }

    if args.list_shortcuts && !args.quiet {
        eprintln!("Shortcuts:");
        for entry in &rep.shortcuts {
            eprintln!("  {}", format_entry(entry));
        }
    }
    if args.strict {
        if let Some(truncation) = &rep.diagnostics.truncation {
            warn!(
                key = %truncation.key,
                offset = truncation.offset,
                "strict mode rejects truncated input"
            );
            return Err(CliError::new(
                format!(
                    "input truncated inside integer field '{}' at offset {}",
                    truncation.key, truncation.offset
                ),
                Some("records closed before the truncation were still decoded".to_string()),
            ));
        }
    }
    Ok(())
}

fn cmd_vdf_list(args: ListArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let options = scan_options(args.gameprocess_log.as_deref())?;
    debug!(input = %resolved_input.display(), "resolved input");

    let entries = shortcutscan_core::collect_shortcuts(&resolved_input, &options);
    debug!(entries = entries.len(), "shortcuts collected");
    if entries.is_empty() {
        eprintln!("no shortcuts found in {}", resolved_input.display());
    }
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn scan_options(gameprocess_log: Option<&Path>) -> Result<ScanOptions, CliError> {
    if let Some(log) = gameprocess_log {
        if !log.is_file() {
            return Err(CliError::new(
                format!("game-process log not found: {}", log.display()),
                Some("pass the launcher's logs/gameprocess_log.txt".to_string()),
            ));
        }
    }
    Ok(ScanOptions {
        gameprocess_log: gameprocess_log.map(Path::to_path_buf),
    })
}

fn decode_failure(input: &Path, err: shortcutscan_core::ScanError) -> CliError {
    match err {
        shortcutscan_core::ScanError::Decode(err) => CliError::new(
            format!("failed to decode {}: {}", input.display(), err),
            Some("expected a binary shortcuts.vdf written by the launcher".to_string()),
        ),
        other => CliError::new(format!("shortcuts scan failed: {}", other), None),
    }
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let report_abs = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    if let Some(report_dir) = report_abs {
        let report_target = report_dir.join(
            report_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
        );
        if report_target == input_abs {
            return Err(CliError::new(
                format!(
                    "report path must differ from input: {}",
                    report_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn format_entry(entry: &ShortcutEntry) -> String {
    let name = if entry.name.is_empty() {
        "<unnamed>"
    } else {
        entry.name.as_str()
    };
    let url = entry.launch_url.as_deref().unwrap_or("-");
    let played = entry
        .last_played
        .and_then(format_unix)
        .unwrap_or_else(|| "never".to_string());
    format!("{name}\t{url}\t{}\tlast played: {played}", entry.exe)
}

fn format_unix(ts: u64) -> Option<String> {
    let ts = i64::try_from(ts).ok()?;
    OffsetDateTime::from_unix_timestamp(ts)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a shortcuts.vdf file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a shortcuts.vdf file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "vdf" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .vdf file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let bad_pattern = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{pattern}'"),
            Some(format!("pattern error: {detail}")),
        )
    };
    let mut matches = glob(&pattern)
        .map_err(|err| bad_pattern(err.msg.to_string()))?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(Ok(path)),
            Ok(_) => None,
            Err(err) => Some(Err(bad_pattern(err.to_string()))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{pattern}'"),
            Some("check the path or quote the pattern; expected a .vdf file".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed: Vec<String> = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect();
            if count > 3 {
                listed.push("...".to_string());
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{pattern}' ({count} matches); matches: {}",
                    listed.join(", ")
                ),
                Some("pass a single shortcuts file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{format_entry, format_unix, is_glob_pattern};
    use shortcutscan_core::{Record, ShortcutEntry};

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("userdata/*/config/shortcuts.vdf"));
        assert!(!is_glob_pattern("shortcuts.vdf"));
    }

    #[test]
    fn unix_timestamps_format_as_rfc3339() {
        assert_eq!(
            format_unix(1_700_000_000).as_deref(),
            Some("2023-11-14T22:13:20Z")
        );
    }

    #[test]
    fn entry_line_defaults() {
        let entry = ShortcutEntry::from(&Record::default());
        assert_eq!(format_entry(&entry), "<unnamed>\t-\t\tlast played: never");
    }
}
