//! Binary `shortcuts.vdf` decoding.
//!
//! The container is a marker-tagged stream with implicit lengths:
//! - `layout`: marker bytes and fixed widths
//! - `reader`: cursor, marker scan, C-string tokenizer, text decoding
//! - `keys`: key cleanup and vocabulary matching
//! - `value`: value kind selection (including the `appname` override)
//! - `record`: decoded records
//! - `parser`: the step-wise decode loop
//! - `error`: decode errors
//!
//! Decoding is pure and performs no I/O; `source` handles file access.

pub mod error;
pub mod keys;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod record;
pub mod value;

pub use parser::decode_shortcuts;
