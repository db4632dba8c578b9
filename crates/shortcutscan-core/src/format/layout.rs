pub const MARKER_STRING: u8 = 0x01;
pub const MARKER_INT32: u8 = 0x02;
pub const MARKER_RECORD_END: u8 = 0x08;

pub const NUL: u8 = 0x00;
pub const INT32_WIDTH: usize = 4;

pub const PRINTABLE: std::ops::RangeInclusive<u8> = 0x20..=0x7e;

/// Tag byte preceding every field or closing a record.
///
/// # Examples
/// ```
/// use shortcutscan_core::Marker;
///
/// assert_eq!(Marker::from_byte(0x08), Marker::RecordEnd);
/// assert_eq!(Marker::from_byte(0x00), Marker::Unknown(0x00));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    StringField,
    IntField,
    RecordEnd,
    Unknown(u8),
}

impl Marker {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            MARKER_STRING => Marker::StringField,
            MARKER_INT32 => Marker::IntField,
            MARKER_RECORD_END => Marker::RecordEnd,
            other => Marker::Unknown(other),
        }
    }

    pub fn is_recognized(byte: u8) -> bool {
        !matches!(Self::from_byte(byte), Marker::Unknown(_))
    }
}
