use thiserror::Error;

/// Errors raised while decoding a shortcuts container.
///
/// Only `EmptyOrNoMarker` ever reaches callers of `decode_shortcuts`; a
/// truncated integer ends the decode loop and is reported through
/// `Decoded::truncation` instead.
///
/// # Examples
/// ```
/// use shortcutscan_core::DecodeError;
///
/// let err = DecodeError::TruncatedInt { needed: 4, actual: 1 };
/// assert!(err.to_string().contains("truncated integer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input is empty or contains no field marker")]
    EmptyOrNoMarker,
    #[error("truncated integer: need {needed} bytes, got {actual}")]
    TruncatedInt { needed: usize, actual: usize },
}
