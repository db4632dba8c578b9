mod file;

pub use file::{FileSource, ReaderSource};

use std::path::PathBuf;

use thiserror::Error;

/// A one-shot supplier of a complete shortcuts container.
///
/// Implementations release any underlying handle before `into_bytes`
/// returns, on success and on error.
pub trait ShortcutSource {
    fn into_bytes(self) -> Result<Vec<u8>, SourceError>
    where
        Self: Sized;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },
}
