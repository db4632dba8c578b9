//! Last-played backfill from the launcher's game-process log.
//!
//! The log records every process the launcher starts tracking:
//!
//! ```text
//! [2024-03-01 19:04:11] AppID 3452816845 adding PID 4242 as a tracked process ""C:\Games\game.exe""
//! ```
//!
//! Timestamps carry no zone and are read as UTC. Lines that do not match are
//! ignored.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use time::PrimitiveDateTime;
use time::macros::format_description;

use super::entry::ShortcutEntry;

static TRACKED_PROCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\] AppID (\d+) adding PID (\d+) as a tracked process ""(.+?)"""#,
    )
    .expect("valid tracked process pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessLaunch {
    /// Unix seconds.
    pub timestamp: u64,
    pub appid: u64,
    pub pid: u32,
    pub exe: String,
}

pub fn parse_gameprocess_log(text: &str) -> Vec<ProcessLaunch> {
    text.lines().filter_map(parse_line).collect()
}

pub fn load_gameprocess_log(path: &Path) -> std::io::Result<Vec<ProcessLaunch>> {
    let bytes = std::fs::read(path)?;
    Ok(parse_gameprocess_log(&String::from_utf8_lossy(&bytes)))
}

fn parse_line(line: &str) -> Option<ProcessLaunch> {
    let caps = TRACKED_PROCESS.captures(line)?;
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let timestamp = PrimitiveDateTime::parse(&caps[1], format)
        .ok()?
        .assume_utc()
        .unix_timestamp();
    Some(ProcessLaunch {
        timestamp: u64::try_from(timestamp).ok()?,
        appid: caps[2].parse().ok()?,
        pid: caps[3].parse().ok()?,
        exe: caps[4].to_string(),
    })
}

/// Raise each entry's `last_played` to its latest logged launch.
///
/// Entries match launches by executable path, ignoring surrounding double
/// quotes. Entries without an executable are left alone. Returns the number
/// of entries updated.
pub fn apply_last_played(entries: &mut [ShortcutEntry], launches: &[ProcessLaunch]) -> usize {
    let mut updated = 0;
    for entry in entries.iter_mut() {
        let exe = unquote(&entry.exe);
        if exe.is_empty() {
            continue;
        }
        let latest = launches
            .iter()
            .filter(|launch| unquote(&launch.exe) == exe)
            .map(|launch| launch.timestamp)
            .max();
        let Some(latest) = latest else {
            continue;
        };
        if entry.last_played.is_none_or(|current| latest > current) {
            entry.last_played = Some(latest);
            updated += 1;
        }
    }
    updated
}

fn unquote(path: &str) -> &str {
    path.trim_matches('"')
}
