use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::error::DecodeError;
use super::keys::{FieldKey, resolve_key};
use super::layout::Marker;
use super::reader::ByteCursor;
use super::record::Record;
use super::value::{read_value, value_kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    ScanningForStart,
    InRecord,
    Finished,
}

/// Outcome of a single decode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The first marker was found after `skipped` bytes of leading noise.
    Started { skipped: usize },
    /// A field was read and stored in the current record.
    FieldConsumed { key: FieldKey },
    /// A byte that is not a marker was ignored.
    ByteSkipped { byte: u8 },
    /// A record end closed a record holding `fields` fields.
    RecordClosed { fields: usize },
    /// A record end arrived with nothing accumulated.
    EmptyRecordEnd,
    /// An integer value ran past the end of input. Terminal.
    Truncated(Truncation),
    /// No marker left to read. Terminal.
    Exhausted,
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Truncated(_) | Step::Exhausted)
    }
}

/// Where and how an integer field was cut short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    /// Offset of the first value byte.
    pub offset: usize,
    /// Resolved key of the truncated field.
    pub key: FieldKey,
    /// Bytes left where four were needed.
    pub available: usize,
}

/// Result of a completed decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub records: Vec<Record>,
    pub truncation: Option<Truncation>,
    pub leading_bytes_skipped: usize,
    /// Fields of the unterminated record dropped at end of input.
    pub discarded_fields: usize,
}

/// Resumable decoder over a shortcuts byte stream.
///
/// # Examples
/// ```
/// use shortcutscan_core::{Decoder, Step};
///
/// let bytes = b"\x01exe\x00a.exe\x00\x08";
/// let mut decoder = Decoder::new(bytes);
/// assert_eq!(decoder.step()?, Step::Started { skipped: 0 });
/// assert!(matches!(decoder.step()?, Step::FieldConsumed { .. }));
/// assert_eq!(decoder.step()?, Step::RecordClosed { fields: 1 });
/// assert_eq!(decoder.step()?, Step::Exhausted);
/// assert_eq!(decoder.finish().records.len(), 1);
/// # Ok::<(), shortcutscan_core::DecodeError>(())
/// ```
#[derive(Debug)]
pub struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    state: DecoderState,
    current: Record,
    records: Vec<Record>,
    truncation: Option<Truncation>,
    leading_bytes_skipped: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            state: DecoderState::ScanningForStart,
            current: Record::default(),
            records: Vec::new(),
            truncation: None,
            leading_bytes_skipped: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Advance by one marker.
    ///
    /// # Errors
    /// Returns `DecodeError::EmptyOrNoMarker` from the first step when the
    /// input holds no marker at all.
    pub fn step(&mut self) -> Result<Step, DecodeError> {
        match self.state {
            DecoderState::ScanningForStart => {
                let skipped = match self.cursor.scan_to_marker() {
                    Ok(skipped) => skipped,
                    Err(err) => {
                        self.state = DecoderState::Finished;
                        return Err(err);
                    }
                };
                self.leading_bytes_skipped = skipped;
                self.state = DecoderState::InRecord;
                debug!(skipped, "found first shortcut marker");
                Ok(Step::Started { skipped })
            }
            DecoderState::InRecord => {
                let step = self.step_in_record();
                if step.is_terminal() {
                    self.state = DecoderState::Finished;
                }
                Ok(step)
            }
            DecoderState::Finished => Ok(Step::Exhausted),
        }
    }

    fn step_in_record(&mut self) -> Step {
        let Some(byte) = self.cursor.read_u8() else {
            return Step::Exhausted;
        };
        let marker = Marker::from_byte(byte);
        match marker {
            Marker::RecordEnd => self.close_record(),
            Marker::Unknown(byte) => Step::ByteSkipped { byte },
            Marker::StringField | Marker::IntField => self.read_field(marker),
        }
    }

    fn close_record(&mut self) -> Step {
        if self.current.is_empty() {
            return Step::EmptyRecordEnd;
        }
        let record = std::mem::take(&mut self.current);
        let fields = record.len();
        trace!(fields, index = self.records.len(), "record closed");
        self.records.push(record);
        Step::RecordClosed { fields }
    }

    fn read_field(&mut self, marker: Marker) -> Step {
        let key = resolve_key(self.cursor.read_cstring());
        let kind = value_kind(&key, marker);
        let offset = self.cursor.position();
        match read_value(&mut self.cursor, kind) {
            Ok(value) => {
                trace!(%key, ?kind, offset, "field decoded");
                self.current.upsert(key.clone(), value);
                Step::FieldConsumed { key }
            }
            Err(DecodeError::TruncatedInt { actual, .. }) => {
                warn!(%key, offset, available = actual, "integer field truncated at end of input");
                let truncation = Truncation {
                    offset,
                    key,
                    available: actual,
                };
                self.truncation = Some(truncation.clone());
                Step::Truncated(truncation)
            }
            // Value reads never scan for markers.
            Err(err @ DecodeError::EmptyOrNoMarker) => unreachable!("{err}"),
        }
    }

    /// Consume the decoder, dropping any unterminated record.
    pub fn finish(self) -> Decoded {
        let discarded_fields = self.current.len();
        if discarded_fields > 0 {
            debug!(discarded_fields, "dropping unterminated record");
        }
        debug!(
            records = self.records.len(),
            truncated = self.truncation.is_some(),
            "shortcut decode finished"
        );
        Decoded {
            records: self.records,
            truncation: self.truncation,
            leading_bytes_skipped: self.leading_bytes_skipped,
            discarded_fields,
        }
    }
}

/// Decode every complete record in `bytes`.
///
/// # Examples
/// ```
/// use shortcutscan_core::{FieldValue, decode_shortcuts};
///
/// let bytes = b"\x00shortcuts\x00\x02appid\x00\x2a\x00\x00\x00\x08\x08";
/// let decoded = decode_shortcuts(bytes)?;
/// assert_eq!(decoded.records.len(), 1);
/// assert_eq!(decoded.records[0].get("appid"), Some(&FieldValue::Int(42)));
/// # Ok::<(), shortcutscan_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns `DecodeError::EmptyOrNoMarker` when the input is empty or holds no
/// marker byte. A truncated trailing integer is not an error; see
/// `Decoded::truncation`.
pub fn decode_shortcuts(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    let mut decoder = Decoder::new(bytes);
    while !decoder.step()?.is_terminal() {}
    Ok(decoder.finish())
}
