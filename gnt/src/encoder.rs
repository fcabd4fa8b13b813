use std::io::Write;
use std::path::PathBuf;

use crate::error::GntError;
use crate::record::{RecordHeader, Sample};

/// Writes samples in container layout
pub struct SampleWriter<W> {
    inner: W,
    path: PathBuf,
    records: u64,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            records: 0,
        }
    }

    pub fn write_sample(&mut self, sample: &Sample) -> Result<(), GntError> {
        self.write_bitmap(sample.tag_code, sample.width, sample.height, &sample.pixels)
    }

    pub fn write_bitmap(
        &mut self,
        tag_code: u16,
        width: u16,
        height: u16,
        pixels: &[u8],
    ) -> Result<(), GntError> {
        let mut header = RecordHeader {
            record_size: 0,
            tag_code,
            width,
            height,
        };
        if pixels.len() != header.pixel_len() {
            return Err(GntError::BitmapSizeMismatch {
                width,
                height,
                expected: header.pixel_len(),
                actual: pixels.len(),
            });
        }
        // 10 + 65535 * 65535 still fits in u32
        header.record_size = header.expected_size() as u32;

        self.inner
            .write_all(&header.to_bytes())
            .and_then(|_| self.inner.write_all(pixels))
            .map_err(|e| GntError::io(&self.path, e))?;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, GntError> {
        self.inner
            .flush()
            .map_err(|e| GntError::io(&self.path, e))?;
        Ok(self.inner)
    }
}

/// Encode a set of samples into an in-memory container
pub fn encode_samples<'a, I>(samples: I) -> Result<Vec<u8>, GntError>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut writer = SampleWriter::new(Vec::new(), "<memory>");
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finish()
}
