use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;

pub const LABELS_FILE: &str = "labels.jsonl";

/// `labels.jsonl` manifest next to the generated images
pub struct LabelsWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl LabelsWriter {
    /// Create `out_dir` if needed and truncate its manifest
    pub fn create(out_dir: &Path) -> anyhow::Result<Self> {
        grid_cutter::ensure_dirs([out_dir])?;
        let path = out_dir.join(LABELS_FILE);
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        Ok(Self {
            path,
            writer: Some(BufWriter::with_capacity(1 << 20, file)),
        })
    }

    pub fn write_record<T: Serialize>(&mut self, rec: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string(rec)?;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{json}")
                .with_context(|| format!("writing {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Flush and sync the manifest
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.take() {
            writer
                .into_inner()
                .map_err(|e| e.into_error())
                .and_then(|f| f.sync_all())
                .with_context(|| format!("finishing {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl Drop for LabelsWriter {
    fn drop(&mut self) {
        let _ = self.finalize();
    }
}
