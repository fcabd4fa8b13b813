//! Streaming decoder for GNT containers
//!
//! A container has no index and no footer, so the decoder walks it record
//! by record and relies on the record size cross-check to notice framing
//! drift. Decoding is pull-based: nothing is read before the caller asks
//! for the next sample, and at most one file is open at a time.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FormatError, GntError};
use crate::record::{CONTAINER_EXTENSION, HEADER_SIZE, RecordHeader, Sample};

/// Decodes the records of a single container stream
///
/// Yields `Ok(sample)` per record and stops after the first error.
pub struct SampleReader<R> {
    inner: R,
    path: PathBuf,
    offset: u64,
    records: u64,
    done: bool,
}

impl<R: Read> SampleReader<R> {
    /// `path` names the source in error messages, it is never opened
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            offset: 0,
            records: 0,
            done: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of records decoded so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Read the next record, `Ok(None)` on a clean end of stream
    pub fn read_sample(&mut self) -> Result<Option<Sample>, GntError> {
        let mut raw = [0u8; HEADER_SIZE];
        let got = self
            .fill_header(&mut raw)
            .map_err(|e| GntError::io(&self.path, e))?;
        if got == 0 {
            return Ok(None);
        }
        if got < HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                path: self.path.clone(),
                offset: self.offset,
                len: got,
            }
            .into());
        }

        let header = RecordHeader::parse(&raw);
        if !header.is_consistent() {
            return Err(FormatError::SizeMismatch {
                path: self.path.clone(),
                offset: self.offset,
                declared: header.record_size,
                expected: header.expected_size(),
            }
            .into());
        }

        let mut pixels = vec![0u8; header.pixel_len()];
        self.inner.read_exact(&mut pixels).map_err(|e| {
            let msg = format!(
                "bitmap of record at offset {} ends early ({} bytes expected)",
                self.offset,
                pixels.len()
            );
            GntError::io(&self.path, io::Error::new(e.kind(), msg))
        })?;

        self.offset += header.expected_size();
        self.records += 1;
        Ok(Some(Sample::new(
            header.tag_code,
            header.width,
            header.height,
            pixels,
        )))
    }

    // Like read_exact, but reports how many bytes arrived before EOF
    fn fill_header(&mut self, buf: &mut [u8; HEADER_SIZE]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for SampleReader<R> {
    type Item = Result<Sample, GntError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_sample() {
            Ok(Some(sample)) => Some(Ok(sample)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for SampleReader<R> {}

/// Open a single container file
pub fn read_gnt_file<P: AsRef<Path>>(path: P) -> Result<SampleReader<BufReader<File>>, GntError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GntError::io(path, e))?;
    Ok(SampleReader::new(BufReader::new(file), path))
}

/// Container files of a directory, sorted by file name
///
/// Listing order of the file system is not stable, sorting keeps the
/// decode order reproducible.
pub fn list_container_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, GntError> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GntError::io(dir, e))? {
        let path = entry.map_err(|e| GntError::io(dir, e))?.path();
        let is_container = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXTENSION));
        if is_container && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Decode every container file of `dir`, file after file
///
/// The directory is listed up front; files are opened lazily. Calling
/// again starts over from the first file.
pub fn read_gnt_dir<P: AsRef<Path>>(dir: P) -> Result<DirSamples, GntError> {
    let files = list_container_files(dir.as_ref())?;
    debug!(
        dir = %dir.as_ref().display(),
        files = files.len(),
        "listed container directory"
    );
    Ok(DirSamples {
        files: files.into_iter(),
        current: None,
        failed: false,
    })
}

/// Samples of a container directory, see [`read_gnt_dir`]
pub struct DirSamples {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<SampleReader<BufReader<File>>>,
    failed: bool,
}

impl DirSamples {
    /// File the last yielded sample came from
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_ref().map(|r| r.path())
    }

    fn fail(&mut self, err: GntError) -> Option<Result<Sample, GntError>> {
        self.failed = true;
        self.current = None;
        Some(Err(err))
    }
}

impl Iterator for DirSamples {
    type Item = Result<Sample, GntError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(reader) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(sample)) => return Some(Ok(sample)),
                    Some(Err(e)) => return self.fail(e),
                    None => {
                        debug!(
                            file = %reader.path().display(),
                            records = reader.records(),
                            bytes = reader.offset(),
                            "container file drained"
                        );
                        // dropping the reader closes the file before the next open
                        self.current = None;
                    }
                }
            }

            let path = self.files.next()?;
            match read_gnt_file(&path) {
                Ok(reader) => self.current = Some(reader),
                Err(e) => return self.fail(e),
            }
        }
    }
}

impl std::iter::FusedIterator for DirSamples {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(tag: u16, w: u16, h: u16, size: u32, fill: u8) -> Vec<u8> {
        let mut out = RecordHeader {
            record_size: size,
            tag_code: tag,
            width: w,
            height: h,
        }
        .to_bytes()
        .to_vec();
        out.extend(std::iter::repeat_n(fill, w as usize * h as usize));
        out
    }

    #[test]
    fn test_decodes_consecutive_records() {
        let mut bytes = record(0xb0a1, 2, 3, 16, 7);
        bytes.extend(record(0xb0a2, 4, 1, 14, 9));
        let samples: Vec<Sample> = SampleReader::new(Cursor::new(bytes), "mem")
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].tag_code, 0xb0a1);
        assert_eq!((samples[0].width, samples[0].height), (2, 3));
        assert_eq!(samples[0].pixels, vec![7; 6]);
        assert_eq!(samples[1].tag_code, 0xb0a2);
        assert_eq!(samples[1].pixels, vec![9; 4]);
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        let mut reader = SampleReader::new(Cursor::new(Vec::new()), "empty");
        assert!(reader.next().is_none());
        assert_eq!(reader.records(), 0);
    }

    #[test]
    fn test_size_mismatch_reports_offset() {
        let mut bytes = record(1, 2, 2, 14, 0);
        bytes.extend(record(2, 10, 10, 119, 0));
        bytes.extend(record(3, 2, 2, 14, 0));
        let mut reader = SampleReader::new(Cursor::new(bytes), "bad.gnt");

        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(GntError::Format(FormatError::SizeMismatch {
                offset,
                declared,
                expected,
                ..
            }))) => {
                assert_eq!(offset, 14);
                assert_eq!(declared, 119);
                assert_eq!(expected, 110);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_short_header_is_format_error() {
        let bytes = vec![0u8; 5];
        let mut reader = SampleReader::new(Cursor::new(bytes), "short.gnt");
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            GntError::Format(FormatError::TruncatedHeader { len: 5, offset: 0, .. })
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_short_bitmap_is_io_error() {
        let mut bytes = record(1, 4, 4, 26, 3);
        bytes.truncate(HEADER_SIZE + 7);
        let err = SampleReader::new(Cursor::new(bytes), "cut.gnt")
            .next()
            .unwrap()
            .unwrap_err();
        match err {
            GntError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_zero_sized_bitmap() {
        let bytes = record(5, 0, 7, 10, 0);
        let samples: Vec<Sample> = SampleReader::new(Cursor::new(bytes), "mem")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].pixels.is_empty());
    }

    // Reader that hands out one byte per call
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(1);
            self.0.read(&mut buf[..n])
        }
    }

    #[test]
    fn test_header_split_across_reads() {
        let bytes = record(0x1234, 3, 3, 19, 1);
        let samples: Vec<Sample> = SampleReader::new(Trickle(Cursor::new(bytes)), "trickle")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].tag_code, 0x1234);
    }
}
