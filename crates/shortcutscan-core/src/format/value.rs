use super::error::DecodeError;
use super::keys::{FieldKey, KnownKey};
use super::layout::Marker;
use super::reader::{ByteCursor, decode_text};
use super::record::FieldValue;

/// Keys whose value is always a string, whatever marker precedes them.
pub const TEXT_OVERRIDES: &[KnownKey] = &[KnownKey::AppName];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Int,
}

/// Pick how to read a field's value from its resolved key and marker.
///
/// # Examples
/// ```
/// use shortcutscan_core::{FieldKey, KnownKey, Marker, ValueKind, value_kind};
///
/// let appname = FieldKey::Known(KnownKey::AppName);
/// assert_eq!(value_kind(&appname, Marker::IntField), ValueKind::Text);
/// assert_eq!(value_kind(&"appid".into(), Marker::IntField), ValueKind::Int);
/// ```
pub fn value_kind(key: &FieldKey, marker: Marker) -> ValueKind {
    if TEXT_OVERRIDES.iter().any(|forced| key.is(*forced)) {
        return ValueKind::Text;
    }
    match marker {
        Marker::IntField => ValueKind::Int,
        _ => ValueKind::Text,
    }
}

pub fn read_value(cursor: &mut ByteCursor<'_>, kind: ValueKind) -> Result<FieldValue, DecodeError> {
    match kind {
        ValueKind::Text => Ok(FieldValue::Text(decode_text(cursor.read_cstring()))),
        ValueKind::Int => cursor.read_u32_le().map(FieldValue::Int),
    }
}
