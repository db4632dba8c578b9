use super::error::DecodeError;
use super::layout::{self, Marker};

/// Sequential cursor over a borrowed byte stream with one-byte seek-back.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Step back over the last byte read. No-op at the start of the stream.
    pub fn rewind_one(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Skip leading noise until a recognized marker byte, leaving the cursor
    /// on the marker.
    ///
    /// # Examples
    /// ```
    /// use shortcutscan_core::ByteCursor;
    ///
    /// let mut cursor = ByteCursor::new(b"\x00junk\x02appid\x00");
    /// assert_eq!(cursor.scan_to_marker()?, 5);
    /// assert_eq!(cursor.read_u8(), Some(0x02));
    /// # Ok::<(), shortcutscan_core::DecodeError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `DecodeError::EmptyOrNoMarker` when the stream ends first.
    pub fn scan_to_marker(&mut self) -> Result<usize, DecodeError> {
        let start = self.pos;
        while let Some(byte) = self.read_u8() {
            if Marker::is_recognized(byte) {
                self.rewind_one();
                return Ok(self.pos - start);
            }
        }
        Err(DecodeError::EmptyOrNoMarker)
    }

    /// Read up to the next NUL (consumed, not returned) or the end of input.
    pub fn read_cstring(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        match rest.iter().position(|&b| b == layout::NUL) {
            Some(end) => {
                self.pos += end + 1;
                &rest[..end]
            }
            None => {
                self.pos = self.bytes.len();
                rest
            }
        }
    }

    /// Read a little-endian u32.
    ///
    /// # Errors
    /// Returns `DecodeError::TruncatedInt` when fewer than four bytes remain;
    /// the remaining bytes are consumed.
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let end = self.pos + layout::INT32_WIDTH;
        let Some(bytes) = self.bytes.get(self.pos..end) else {
            let actual = self.remaining();
            self.pos = self.bytes.len();
            return Err(DecodeError::TruncatedInt {
                needed: layout::INT32_WIDTH,
                actual,
            });
        };
        self.pos = end;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decode bytes as UTF-8, falling back to Latin-1 which maps every byte.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
