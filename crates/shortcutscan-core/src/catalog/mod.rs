use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::format::decode_shortcuts;
use crate::format::error::DecodeError;
use crate::source::{FileSource, ShortcutSource, SourceError};
use crate::{Diagnostics, Report, make_stub_report};

mod entry;
mod playtime;

pub use entry::{LAUNCH_URL_PREFIX, SHORTCUT_ID_FLAGS, ShortcutEntry, launch_url, shortcut_game_id};
pub use playtime::{ProcessLaunch, apply_last_played, load_gameprocess_log, parse_gameprocess_log};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Optional inputs that enrich a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Game-process log used to backfill `last_played`.
    pub gameprocess_log: Option<PathBuf>,
}

pub fn scan_shortcuts_file(path: &Path, options: &ScanOptions) -> Result<Report, ScanError> {
    let source = FileSource::open(path)?;
    scan_source(&path.display().to_string(), source, options)
}

pub fn scan_source<S: ShortcutSource>(
    label: &str,
    source: S,
    options: &ScanOptions,
) -> Result<Report, ScanError> {
    let bytes = source.into_bytes()?;
    let decoded = decode_shortcuts(&bytes)?;

    let mut shortcuts: Vec<ShortcutEntry> =
        decoded.records.iter().map(ShortcutEntry::from).collect();
    if let Some(log) = options.gameprocess_log.as_deref() {
        let launches = load_gameprocess_log(log)?;
        let updated = apply_last_played(&mut shortcuts, &launches);
        debug!(launches = launches.len(), updated, "applied game-process log");
    }

    let mut report = make_stub_report(label, bytes.len() as u64);
    report.records = decoded.records;
    report.shortcuts = shortcuts;
    report.diagnostics = Diagnostics {
        leading_bytes_skipped: decoded.leading_bytes_skipped,
        discarded_fields: decoded.discarded_fields,
        truncation: decoded.truncation,
    };
    Ok(report)
}

/// Best-effort variant of [`scan_shortcuts_file`] for catalog ingestion.
///
/// A file that cannot be read or decoded contributes no entries; the failure
/// is logged instead of returned so unrelated sources keep loading. An
/// unreadable game-process log only skips the `last_played` backfill.
pub fn collect_shortcuts(path: &Path, options: &ScanOptions) -> Vec<ShortcutEntry> {
    let mut shortcuts = match scan_shortcuts_file(path, &ScanOptions::default()) {
        Ok(report) => report.shortcuts,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable shortcuts file");
            return Vec::new();
        }
    };
    if let Some(log) = options.gameprocess_log.as_deref() {
        match load_gameprocess_log(log) {
            Ok(launches) => {
                apply_last_played(&mut shortcuts, &launches);
            }
            Err(err) => {
                warn!(
                    log = %log.display(),
                    error = %err,
                    "game-process log unreadable; last played not backfilled"
                );
            }
        }
    }
    shortcuts
}
