use serde::{Deserialize, Serialize};

use super::keys::{FieldKey, KnownKey};

/// Decoded value of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(u32),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: FieldKey,
    pub value: FieldValue,
}

/// One shortcut entry as it appeared in the stream.
///
/// Fields keep their first-seen position; writing an existing key replaces
/// its value.
///
/// # Examples
/// ```
/// use shortcutscan_core::{FieldValue, KnownKey, Record};
///
/// let mut record = Record::default();
/// record.upsert("appname".into(), FieldValue::Text("Old".to_string()));
/// record.upsert("exe".into(), FieldValue::Text("game.exe".to_string()));
/// record.upsert("appname".into(), FieldValue::Text("New".to_string()));
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.text(KnownKey::AppName), Some("New"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<Field>,
}

impl Record {
    pub fn upsert(&mut self, key: FieldKey, value: FieldValue) {
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { key, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.key.as_str() == name)
            .map(|field| &field.value)
    }

    pub fn text(&self, key: KnownKey) -> Option<&str> {
        self.get(key.as_str()).and_then(FieldValue::as_text)
    }

    pub fn int(&self, key: KnownKey) -> Option<u32> {
        self.get(key.as_str()).and_then(FieldValue::as_int)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
