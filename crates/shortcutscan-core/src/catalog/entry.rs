use serde::{Deserialize, Serialize};

use crate::format::keys::KnownKey;
use crate::format::record::{FieldValue, Record};

/// Low bits the launcher sets on the 64-bit game id of a non-store shortcut.
pub const SHORTCUT_ID_FLAGS: u64 = 0x0200_0000;
pub const LAUNCH_URL_PREFIX: &str = "steam://rungameid/";

const APPID_KEY: &str = "appid";

/// Launcher-facing view of a decoded record.
///
/// Missing fields become empty strings or `None`; no field is required.
///
/// # Examples
/// ```
/// use shortcutscan_core::{FieldValue, Record, ShortcutEntry};
///
/// let mut record = Record::default();
/// record.upsert("appid".into(), FieldValue::Int(1));
/// record.upsert("appname".into(), FieldValue::Text("Game".to_string()));
/// let entry = ShortcutEntry::from(&record);
/// assert_eq!(entry.id, Some(0x1_0200_0000));
/// assert_eq!(entry.launch_url.as_deref(), Some("steam://rungameid/4328521728"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutEntry {
    /// 32-bit shortcut app id, when the record carried one as an integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<u32>,
    /// 64-bit game id used in launch URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub exe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_url: Option<String>,
    pub hidden: bool,
    /// Tag values in stream order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Unix seconds of the last launch, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<u64>,
}

impl From<&Record> for ShortcutEntry {
    fn from(record: &Record) -> Self {
        let appid = record.get(APPID_KEY).and_then(FieldValue::as_int);
        let id = appid.map(shortcut_game_id);
        let owned = |key: KnownKey| record.text(key).map(str::to_string);

        Self {
            appid,
            id,
            name: owned(KnownKey::AppName).unwrap_or_default(),
            exe: owned(KnownKey::Exe).unwrap_or_default(),
            start_dir: owned(KnownKey::StartDir),
            icon: owned(KnownKey::Icon),
            launch_options: owned(KnownKey::LaunchOptions),
            launch_url: id.map(launch_url),
            hidden: record.int(KnownKey::IsHidden).is_some_and(|v| v != 0),
            tags: tags(record),
            last_played: record
                .int(KnownKey::LastPlayTime)
                .filter(|&ts| ts != 0)
                .map(u64::from),
        }
    }
}

pub fn shortcut_game_id(appid: u32) -> u64 {
    (u64::from(appid) << 32) | SHORTCUT_ID_FLAGS
}

pub fn launch_url(id: u64) -> String {
    format!("{LAUNCH_URL_PREFIX}{id}")
}

// Tags are stored as a nested list whose keys are decimal indices.
fn tags(record: &Record) -> Vec<String> {
    record
        .fields
        .iter()
        .filter(|field| is_index(field.key.as_str()))
        .filter_map(|field| field.value.as_text().map(str::to_string))
        .collect()
}

fn is_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}
