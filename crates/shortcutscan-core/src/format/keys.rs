//! Key resolution against the known shortcut vocabulary.
//!
//! Raw key bytes may carry stray control bytes or garbage around the real
//! name. Resolution filters them to printable ASCII, then looks for a
//! vocabulary entry inside the text. When several entries match, the longest
//! one wins (`DevkitGameID` over `Devkit`); equal lengths fall back to the
//! order of `VOCABULARY`. Text with no vocabulary entry keeps its last
//! identifier-shaped word.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout;
use super::reader::decode_text;

/// Canonical field names written by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownKey {
    AppName,
    Exe,
    StartDir,
    Icon,
    ShortcutPath,
    LaunchOptions,
    IsHidden,
    AllowDesktopConfig,
    AllowOverlay,
    OpenVr,
    Devkit,
    DevkitGameId,
    DevkitOverrideAppId,
    LastPlayTime,
    FlatpakAppId,
}

/// Vocabulary in canonical order; this order breaks equal-length ties.
pub const VOCABULARY: [KnownKey; 15] = [
    KnownKey::AppName,
    KnownKey::Exe,
    KnownKey::StartDir,
    KnownKey::Icon,
    KnownKey::ShortcutPath,
    KnownKey::LaunchOptions,
    KnownKey::IsHidden,
    KnownKey::AllowDesktopConfig,
    KnownKey::AllowOverlay,
    KnownKey::OpenVr,
    KnownKey::Devkit,
    KnownKey::DevkitGameId,
    KnownKey::DevkitOverrideAppId,
    KnownKey::LastPlayTime,
    KnownKey::FlatpakAppId,
];

impl KnownKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            KnownKey::AppName => "appname",
            KnownKey::Exe => "exe",
            KnownKey::StartDir => "StartDir",
            KnownKey::Icon => "icon",
            KnownKey::ShortcutPath => "ShortcutPath",
            KnownKey::LaunchOptions => "LaunchOptions",
            KnownKey::IsHidden => "IsHidden",
            KnownKey::AllowDesktopConfig => "AllowDesktopConfig",
            KnownKey::AllowOverlay => "AllowOverlay",
            KnownKey::OpenVr => "OpenVR",
            KnownKey::Devkit => "Devkit",
            KnownKey::DevkitGameId => "DevkitGameID",
            KnownKey::DevkitOverrideAppId => "DevkitOverrideAppID",
            KnownKey::LastPlayTime => "LastPlayTime",
            KnownKey::FlatpakAppId => "FlatpakAppID",
        }
    }

    /// Exact (case-sensitive) lookup by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        VOCABULARY.into_iter().find(|key| key.as_str() == name)
    }

    /// Longest vocabulary entry contained in `text`.
    pub fn find_in(text: &str) -> Option<Self> {
        let mut best: Option<KnownKey> = None;
        for key in VOCABULARY {
            if !text.contains(key.as_str()) {
                continue;
            }
            match best {
                Some(current) if current.as_str().len() >= key.as_str().len() => {}
                _ => best = Some(key),
            }
        }
        best
    }
}

/// A resolved field name: a vocabulary entry or the best-effort fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKey {
    Known(KnownKey),
    Other(String),
}

impl FieldKey {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKey::Known(key) => key.as_str(),
            FieldKey::Other(name) => name,
        }
    }

    pub fn is(&self, key: KnownKey) -> bool {
        matches!(self, FieldKey::Known(known) if *known == key)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        match KnownKey::from_name(&name) {
            Some(key) => FieldKey::Known(key),
            None => FieldKey::Other(name),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::from(name.to_string())
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        match key {
            FieldKey::Known(key) => key.as_str().to_string(),
            FieldKey::Other(name) => name,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map raw (possibly corrupted) key bytes to a field key. Never fails.
///
/// # Examples
/// ```
/// use shortcutscan_core::{FieldKey, KnownKey, resolve_key};
///
/// assert_eq!(resolve_key(b"ic\xffon"), FieldKey::Known(KnownKey::Icon));
/// assert_eq!(resolve_key(b"appid"), FieldKey::Other("appid".to_string()));
/// ```
pub fn resolve_key(raw: &[u8]) -> FieldKey {
    let printable: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| layout::PRINTABLE.contains(b))
        .collect();
    let text = decode_text(&printable);

    if let Some(key) = KnownKey::find_in(&text) {
        return FieldKey::Known(key);
    }

    let fallback = text
        .split_whitespace()
        .filter(|word| is_identifier(word))
        .last()
        .map(str::to_string)
        .unwrap_or_else(|| text.trim().to_string());
    FieldKey::Other(fallback)
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
