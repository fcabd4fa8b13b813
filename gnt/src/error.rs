//! Error types for GNT container decoding and encoding

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the container codec
#[derive(Error, Debug)]
pub enum GntError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("IO error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Bitmap {width}x{height} needs {expected} bytes, got {actual}")]
    BitmapSizeMismatch {
        width: u16,
        height: u16,
        expected: usize,
        actual: usize,
    },
}

/// Framing errors: the bytes on disk do not describe a valid record
#[derive(Error, Debug)]
pub enum FormatError {
    #[error(
        "{}: record at offset {offset} declares {declared} bytes, header implies {expected}",
        path.display()
    )]
    SizeMismatch {
        path: PathBuf,
        offset: u64,
        declared: u32,
        expected: u64,
    },

    #[error("{}: truncated header at offset {offset} ({len} of 10 bytes)", path.display())]
    TruncatedHeader {
        path: PathBuf,
        offset: u64,
        len: usize,
    },
}

impl GntError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GntError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, GntError::Format(_))
    }
}
