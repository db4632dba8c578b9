//! shortcutscan core library: recovery-oriented decoding of the launcher's
//! binary `shortcuts.vdf` container.
//!
//! The container is a marker-tagged stream without explicit lengths: strings
//! are NUL-terminated, integers are four little-endian bytes, and a record end
//! marker closes each shortcut. Real files carry leading headers, nested tag
//! lists and occasionally corrupted key bytes, so the decoder scans for the
//! first marker, skips unknown bytes, resolves keys against a fixed vocabulary
//! and keeps every record it managed to close.
//!
//! Layers:
//! - `format`: pure decoding (layout/reader/keys/value/record/parser)
//! - `source`: byte sources; all file I/O lives here
//! - `catalog`: shortcut entries, game-process log backfill, reports
//!
//! Invariants:
//! - Records are emitted only on a record end marker and only when non-empty.
//! - `appname` is always decoded as a string.
//! - Output order is stream order; reports are deterministic.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use shortcutscan_core::{ScanOptions, scan_shortcuts_file};
//!
//! let report = scan_shortcuts_file(Path::new("shortcuts.vdf"), &ScanOptions::default())?;
//! for shortcut in &report.shortcuts {
//!     println!("{} -> {:?}", shortcut.name, shortcut.launch_url);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod catalog;
mod format;
mod source;

pub use catalog::{
    LAUNCH_URL_PREFIX, ProcessLaunch, SHORTCUT_ID_FLAGS, ScanError, ScanOptions, ShortcutEntry,
    apply_last_played, collect_shortcuts, launch_url, load_gameprocess_log,
    parse_gameprocess_log, scan_shortcuts_file, scan_source, shortcut_game_id,
};
pub use format::decode_shortcuts;
pub use format::error::DecodeError;
pub use format::keys::{FieldKey, KnownKey, VOCABULARY, resolve_key};
pub use format::layout::Marker;
pub use format::parser::{Decoded, Decoder, DecoderState, Step, Truncation};
pub use format::reader::{ByteCursor, decode_text};
pub use format::record::{Field, FieldValue, Record};
pub use format::value::{TEXT_OVERRIDES, ValueKind, value_kind};
pub use source::{FileSource, ReaderSource, ShortcutSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded shortcuts plus derived entries and decode diagnostics.
///
/// # Examples
/// ```
/// use shortcutscan_core::make_stub_report;
///
/// let report = make_stub_report("shortcuts.vdf", 123);
/// assert_eq!(report.report_version, shortcutscan_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input metadata.
    pub input: InputInfo,
    /// Decoded records in stream order.
    pub records: Vec<Record>,
    /// One entry per record, same order.
    pub shortcuts: Vec<ShortcutEntry>,
    /// What the decoder skipped or dropped.
    pub diagnostics: Diagnostics,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
///
/// # Examples
/// ```
/// use shortcutscan_core::InputInfo;
///
/// let input = InputInfo {
///     path: "shortcuts.vdf".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path or label as provided to the scanner.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Decode diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Bytes skipped before the first marker.
    pub leading_bytes_skipped: usize,
    /// Fields of an unterminated trailing record that were dropped.
    pub discarded_fields: usize,
    /// Present when an integer field ran past the end of input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
}

/// Build a report with base fields filled and nothing decoded.
///
/// # Examples
/// ```
/// use shortcutscan_core::make_stub_report;
///
/// let report = make_stub_report("shortcuts.vdf", 123);
/// assert!(report.records.is_empty());
/// assert_eq!(report.tool.name, "shortcutscan");
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "shortcutscan".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        records: vec![],
        shortcuts: vec![],
        diagnostics: Diagnostics::default(),
    }
}
