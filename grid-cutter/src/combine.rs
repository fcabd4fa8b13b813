use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, imageops};
use tracing::{debug, info};

use crate::{ensure_dirs, error::CutError, grid::Order};

/// Which half of a translation result to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageKind {
    #[default]
    Fake,
    Real,
}

impl ImageKind {
    /// Substring that marks the kind in a file name
    pub fn marker(&self) -> &'static str {
        match self {
            ImageKind::Fake => "fake",
            ImageKind::Real => "real",
        }
    }
}

/// Files of `dir` whose name contains the marker of `kind`, sorted by name
pub fn matching_images(dir: &Path, kind: ImageKind) -> Result<Vec<PathBuf>, CutError> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CutError::io(dir, e))? {
        let entry = entry.map_err(|e| CutError::io(dir, e))?;
        if entry.file_name().to_string_lossy().contains(kind.marker()) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

/// Top-left corner of the `i`-th image on an `m x n` sheet of `size` cells
pub fn paste_position(i: u32, m: u32, n: u32, size: u32, order: Order) -> (i64, i64) {
    let (i, m, n, size) = (i as i64, m as i64, n as i64, size as i64);
    match order {
        Order::Horizontal => ((i % m) * size, (i / m) * size),
        Order::Vertical => ((m - i / n - 1) * size, (i % n) * size),
    }
}

/// Paste images onto a white `size*m x size*n` grayscale sheet
///
/// Only the first `m * n` images are used. Images are pasted as they are,
/// anything larger than a cell overlaps its neighbours or gets clipped.
pub fn combine_images<I>(
    images: I,
    m: u32,
    n: u32,
    size: u32,
    order: Order,
) -> Result<GrayImage, CutError>
where
    I: IntoIterator<Item = DynamicImage>,
{
    let (width, height) = sheet_size(m, n, size)?;
    let mut sheet = GrayImage::from_pixel(width, height, Luma([255]));
    let cells = m as usize * n as usize;
    for (i, img) in images.into_iter().take(cells).enumerate() {
        let (x, y) = paste_position(i as u32, m, n, size, order);
        imageops::replace(&mut sheet, &img.to_luma8(), x, y);
    }
    Ok(sheet)
}

fn sheet_size(m: u32, n: u32, size: u32) -> Result<(u32, u32), CutError> {
    match (size.checked_mul(m), size.checked_mul(n)) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok((width, height)),
        (width, height) => Err(CutError::BadGrid {
            width: width.unwrap_or(u32::MAX),
            height: height.unwrap_or(u32::MAX),
            m,
            n,
        }),
    }
}

/// Combine the matching images of `image_dir` into `out_dir/combined.png`
pub fn combine_and_save(
    image_dir: &Path,
    out_dir: &Path,
    m: u32,
    n: u32,
    size: u32,
    order: Order,
    kind: ImageKind,
) -> Result<PathBuf, CutError> {
    sheet_size(m, n, size)?;

    let paths = matching_images(image_dir, kind)?;
    let cells = m as usize * n as usize;
    if paths.len() > cells {
        debug!(
            found = paths.len(),
            cells,
            "more images than grid cells, extra images ignored"
        );
    }

    let images = paths
        .iter()
        .take(cells)
        .map(|p| image::open(p).map_err(|e| CutError::image(p, e)))
        .collect::<Result<Vec<_>, _>>()?;
    let placed = images.len();
    let sheet = combine_images(images, m, n, size, order)?;

    ensure_dirs([out_dir])?;
    let out_path = out_dir.join("combined.png");
    sheet
        .save(&out_path)
        .map_err(|e| CutError::image(&out_path, e))?;
    info!(
        images = placed,
        kind = kind.marker(),
        path = %out_path.display(),
        "combined sheet saved"
    );
    Ok(out_path)
}
