//! Reader and writer for GNT handwriting sample containers
//!
//! A container is a flat run of labeled grayscale bitmaps with no index and
//! no footer. [`read_gnt_dir`] streams every container of a directory as
//! `(bitmap, tag code)` samples; [`SampleWriter`] produces the same layout.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod record;

pub use decoder::{DirSamples, SampleReader, list_container_files, read_gnt_dir, read_gnt_file};
pub use encoder::{SampleWriter, encode_samples};
pub use error::{FormatError, GntError};
pub use record::{CONTAINER_EXTENSION, HEADER_SIZE, RecordHeader, Sample};
