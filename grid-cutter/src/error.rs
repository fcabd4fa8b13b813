use std::io;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutError {
    #[error("Image error on {}: {source}", path.display())]
    Image { path: PathBuf, source: ImageError },

    #[error("IO error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Cannot cut a {width}x{height} image into {m}x{n} tiles")]
    BadGrid { width: u32, height: u32, m: u32, n: u32 },

    #[error("Expect order to be horizontal or vertical, got {0}")]
    UnknownOrder(String),

    #[error("Tensor shape {shape:?} does not match {len} values")]
    TensorShape { shape: [usize; 4], len: usize },

    #[error("Unsupported channel count {0}, expected 1 or 3")]
    Channels(usize),

    #[error("Aspect ratio must be positive, got {0}")]
    AspectRatio(f32),
}

impl CutError {
    pub(crate) fn image(path: impl Into<PathBuf>, source: ImageError) -> Self {
        CutError::Image {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CutError::Io {
            path: path.into(),
            source,
        }
    }
}
