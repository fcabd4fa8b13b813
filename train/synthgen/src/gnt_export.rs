use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use gnt::{Sample, read_gnt_dir};
use image::GrayImage;
use tracing::{debug, info, warn};

use crate::{
    io::LabelsWriter,
    record::{SCHEMA, SampleRecord},
};

/// How exported handwriting images are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NamingPolicy {
    /// `hw{tag}.bmp`, a repeated tag overwrites the earlier image
    #[default]
    Label,
    /// `hw{tag}_{index:06}.bmp`, one file per sample
    Indexed,
}

impl NamingPolicy {
    pub fn file_name(&self, tag_code: u16, index: u64) -> String {
        match self {
            NamingPolicy::Label => format!("hw{tag_code}.bmp"),
            NamingPolicy::Indexed => format!("hw{tag_code}_{index:06}.bmp"),
        }
    }
}

pub struct GntExportCfg {
    pub gnt_dir: PathBuf, // "gnt_files"
    pub out_dir: PathBuf, // "trainA"
    pub naming: NamingPolicy,
}

impl Default for GntExportCfg {
    fn default() -> Self {
        Self {
            gnt_dir: PathBuf::from("gnt_files"),
            out_dir: PathBuf::from("trainA"),
            naming: NamingPolicy::Label,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub samples: u64,
    pub files: u64,
    pub overwritten: u64,
    pub skipped_empty: u64,
}

pub fn sample_image(sample: Sample) -> anyhow::Result<GrayImage> {
    let (w, h) = (sample.width, sample.height);
    GrayImage::from_raw(w as u32, h as u32, sample.pixels)
        .ok_or_else(|| anyhow!("sample {w}x{h} has a short pixel buffer"))
}

/// Decode every container of `gnt_dir` into bitmaps under `out_dir`
///
/// The first decode error aborts the export.
pub fn export_gnt_dir(cfg: &GntExportCfg) -> anyhow::Result<ExportSummary> {
    info!(gnt_dir = %cfg.gnt_dir.display(), "converting gnt files");
    let mut samples = read_gnt_dir(&cfg.gnt_dir)
        .with_context(|| format!("listing {}", cfg.gnt_dir.display()))?;
    let mut labels = LabelsWriter::create(&cfg.out_dir)?;

    let mut summary = ExportSummary::default();
    // one manifest record per file name, a rewritten image replaces its record
    let mut records: Vec<SampleRecord> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    while let Some(sample) = samples.next() {
        let sample = sample?;
        let index = summary.samples;
        summary.samples += 1;
        let source = source_name(samples.current_file());

        if sample.pixels.is_empty() {
            warn!(tag_code = sample.tag_code, %source, "skipping empty bitmap");
            summary.skipped_empty += 1;
            continue;
        }

        let name = cfg.naming.file_name(sample.tag_code, index);
        let rec = SampleRecord {
            schema: SCHEMA,
            image: name.clone(),
            tag_code: sample.tag_code,
            width: sample.width,
            height: sample.height,
            source,
        };
        let path = cfg.out_dir.join(&name);
        sample_image(sample)?
            .save(&path)
            .with_context(|| format!("saving {}", path.display()))?;

        match by_name.get(&name) {
            Some(&slot) => {
                warn!(file = %name, source = %rec.source, "tag code seen before, overwriting image");
                summary.overwritten += 1;
                records[slot] = rec;
            }
            None => {
                by_name.insert(name.clone(), records.len());
                records.push(rec);
            }
        }
        debug!(index, file = %name, "sample saved");
    }

    for rec in &records {
        labels.write_record(rec)?;
    }
    labels.finalize()?;
    summary.files = records.len() as u64;
    info!(
        samples = summary.samples,
        files = summary.files,
        overwritten = summary.overwritten,
        "gnt conversion complete"
    );
    Ok(summary)
}

fn source_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnt::encode_samples;

    fn fixture(dir: &Path) -> PathBuf {
        let gnt_dir = dir.join("gnt_files");
        std::fs::create_dir(&gnt_dir).unwrap();
        let a = vec![
            Sample::new(0xb0a1, 3, 2, vec![0, 10, 20, 30, 40, 50]),
            Sample::new(0xb0a2, 2, 2, vec![1, 2, 3, 4]),
        ];
        let b = vec![Sample::new(0xb0a1, 1, 1, vec![77])];
        std::fs::write(gnt_dir.join("1001-c.gnt"), encode_samples(&a).unwrap()).unwrap();
        std::fs::write(gnt_dir.join("1002-c.gnt"), encode_samples(&b).unwrap()).unwrap();
        gnt_dir
    }

    #[test]
    fn test_file_names() {
        assert_eq!(NamingPolicy::Label.file_name(45217, 3), "hw45217.bmp");
        assert_eq!(NamingPolicy::Indexed.file_name(45217, 3), "hw45217_000003.bmp");
    }

    #[test]
    fn test_label_naming_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GntExportCfg {
            gnt_dir: fixture(dir.path()),
            out_dir: dir.path().join("trainA"),
            naming: NamingPolicy::Label,
        };
        let summary = export_gnt_dir(&cfg).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                samples: 3,
                files: 2,
                overwritten: 1,
                skipped_empty: 0,
            }
        );

        // the later sample from the second file wins
        let img = image::open(cfg.out_dir.join("hw45217.bmp")).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0[0], 77);

        let manifest = std::fs::read_to_string(cfg.out_dir.join("labels.jsonl")).unwrap();
        assert_eq!(manifest.lines().count(), 2);
        assert!(manifest.lines().next().unwrap().contains("\"source\":\"1002-c.gnt\""));
    }

    #[test]
    fn test_indexed_naming_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GntExportCfg {
            gnt_dir: fixture(dir.path()),
            out_dir: dir.path().join("out"),
            naming: NamingPolicy::Indexed,
        };
        let summary = export_gnt_dir(&cfg).unwrap();
        assert_eq!(summary.files, 3);
        assert_eq!(summary.overwritten, 0);

        let img = image::open(cfg.out_dir.join("hw45217_000000.bmp"))
            .unwrap()
            .to_luma8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.as_raw(), &vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_corrupt_container_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let gnt_dir = dir.path().join("gnt");
        std::fs::create_dir(&gnt_dir).unwrap();
        std::fs::write(gnt_dir.join("x.gnt"), [0u8; 5]).unwrap();
        let cfg = GntExportCfg {
            gnt_dir,
            out_dir: dir.path().join("out"),
            ..GntExportCfg::default()
        };
        let err = export_gnt_dir(&cfg).unwrap_err();
        assert!(err.downcast_ref::<gnt::GntError>().is_some_and(|e| e.is_format()));
    }

    fn manifest_lines(out_dir: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(out_dir.join("labels.jsonl"))
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_manifest_matches_images_after_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let gnt_dir = dir.path().join("gnt");
        std::fs::create_dir(&gnt_dir).unwrap();
        let samples = vec![
            Sample::new(7, 3, 2, vec![9; 6]),
            Sample::new(8, 2, 2, vec![1; 4]),
            Sample::new(7, 1, 1, vec![5]),
        ];
        std::fs::write(gnt_dir.join("a.gnt"), encode_samples(&samples).unwrap()).unwrap();
        let cfg = GntExportCfg {
            gnt_dir,
            out_dir: dir.path().join("out"),
            naming: NamingPolicy::Label,
        };
        export_gnt_dir(&cfg).unwrap();

        let lines = manifest_lines(&cfg.out_dir);
        assert_eq!(lines.len(), 2);
        let mut names: Vec<&str> = lines.iter().map(|l| l["image"].as_str().unwrap()).collect();
        names.sort();
        assert_eq!(names, vec!["hw7.bmp", "hw8.bmp"]);

        for line in &lines {
            let path = cfg.out_dir.join(line["image"].as_str().unwrap());
            let (w, h) = image::image_dimensions(&path).unwrap();
            assert_eq!(line["width"].as_u64().unwrap(), w as u64);
            assert_eq!(line["height"].as_u64().unwrap(), h as u64);
        }
    }

    #[test]
    fn test_empty_bitmaps_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let gnt_dir = dir.path().join("gnt");
        std::fs::create_dir(&gnt_dir).unwrap();
        let samples = vec![
            Sample::new(1, 0, 4, vec![]),
            Sample::new(2, 2, 1, vec![3, 4]),
        ];
        std::fs::write(gnt_dir.join("a.gnt"), encode_samples(&samples).unwrap()).unwrap();
        let cfg = GntExportCfg {
            gnt_dir,
            out_dir: dir.path().join("out"),
            naming: NamingPolicy::Indexed,
        };
        let summary = export_gnt_dir(&cfg).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                samples: 2,
                files: 1,
                overwritten: 0,
                skipped_empty: 1,
            }
        );
        assert!(!cfg.out_dir.join("hw1_000000.bmp").exists());
        assert!(cfg.out_dir.join("hw2_000001.bmp").exists());
        assert_eq!(manifest_lines(&cfg.out_dir).len(), 1);
    }
}
