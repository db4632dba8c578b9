use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{ShortcutSource, SourceError};

/// Reads a container from disk. The file is opened and closed inside
/// `into_bytes`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(SourceError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShortcutSource for FileSource {
    fn into_bytes(self) -> Result<Vec<u8>, SourceError> {
        let mut file = File::open(&self.path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Adapts any reader, e.g. an in-memory cursor or stdin.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ShortcutSource for ReaderSource<R> {
    fn into_bytes(mut self) -> Result<Vec<u8>, SourceError> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
