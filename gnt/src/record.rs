//! GNT sample record layout
//!
//! Every record is a 10-byte header followed by `width * height` grayscale
//! pixels, one byte each, row-major:
//!
//! | bytes | field       | encoding                  |
//! |-------|-------------|---------------------------|
//! | 0..4  | record size | u32 little-endian         |
//! | 4..6  | tag code    | u16, first byte high      |
//! | 6..8  | width       | u16 little-endian         |
//! | 8..10 | height      | u16 little-endian         |
//!
//! The tag code is stored with the opposite byte order of the other fields.
//! Existing archives depend on it, so it is read and written exactly so.

/// Header size in bytes
pub const HEADER_SIZE: usize = 10;

/// Extension of container files inside a container directory
pub const CONTAINER_EXTENSION: &str = "gnt";

/// Decoded record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub record_size: u32,
    pub tag_code: u16,
    pub width: u16,
    pub height: u16,
}

impl RecordHeader {
    pub fn parse(raw: &[u8; HEADER_SIZE]) -> Self {
        Self {
            record_size: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            tag_code: u16::from_be_bytes([raw[4], raw[5]]),
            width: u16::from_le_bytes([raw[6], raw[7]]),
            height: u16::from_le_bytes([raw[8], raw[9]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut raw = [0u8; HEADER_SIZE];
        raw[0..4].copy_from_slice(&self.record_size.to_le_bytes());
        raw[4..6].copy_from_slice(&self.tag_code.to_be_bytes());
        raw[6..8].copy_from_slice(&self.width.to_le_bytes());
        raw[8..10].copy_from_slice(&self.height.to_le_bytes());
        raw
    }

    /// Number of pixel bytes following the header
    #[inline]
    pub fn pixel_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Record size implied by the dimensions (u64, cannot overflow)
    #[inline]
    pub fn expected_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.width as u64 * self.height as u64
    }

    /// Record size cross-check
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.record_size as u64 == self.expected_size()
    }
}

/// One labeled grayscale bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub tag_code: u16,
    pub width: u16,
    pub height: u16,
    /// `height` rows of `width` bytes
    pub pixels: Vec<u8>,
}

impl Sample {
    pub fn new(tag_code: u16, width: u16, height: u16, pixels: Vec<u8>) -> Self {
        Self {
            tag_code,
            width,
            height,
            pixels,
        }
    }
}
