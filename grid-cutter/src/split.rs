use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use tracing::{debug, info};

use crate::{
    ensure_dirs,
    error::CutError,
    grid::{Order, grid_cells},
};

/// Size of one tile when cutting `width x height` into `m x n`
///
/// Leftover pixels on the right and bottom edge are dropped.
pub fn tile_size(width: u32, height: u32, m: u32, n: u32) -> Result<(u32, u32), CutError> {
    let bad = CutError::BadGrid {
        width,
        height,
        m,
        n,
    };
    if m == 0 || n == 0 {
        return Err(bad);
    }
    let (tw, th) = (width / m, height / n);
    if tw == 0 || th == 0 {
        return Err(bad);
    }
    Ok((tw, th))
}

/// Cut `img` into `m` columns and `n` rows, tiles come out in `order`
pub fn split_image(
    img: &DynamicImage,
    m: u32,
    n: u32,
    order: Order,
) -> Result<impl Iterator<Item = DynamicImage> + '_, CutError> {
    let (w, h) = img.dimensions();
    let (tw, th) = tile_size(w, h, m, n)?;
    Ok(grid_cells(m, n, order)
        .into_iter()
        .map(move |(col, row)| img.crop_imm(col * tw, row * th, tw, th)))
}

/// Split the image at `image_path`, resize every tile to `size` and save
/// them as `{stem}{i:03}.png` under `out_dir`
pub fn split_and_save(
    image_path: &Path,
    out_dir: &Path,
    m: u32,
    n: u32,
    size: (u32, u32),
    order: Order,
) -> Result<Vec<PathBuf>, CutError> {
    let img = image::open(image_path).map_err(|e| CutError::image(image_path, e))?;
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    ensure_dirs([out_dir])?;

    let mut written = Vec::with_capacity(m as usize * n as usize);
    for (i, tile) in split_image(&img, m, n, order)?.enumerate() {
        let out_path = out_dir.join(format!("{stem}{i:03}.png"));
        tile.resize_exact(size.0, size.1, FilterType::CatmullRom)
            .save(&out_path)
            .map_err(|e| CutError::image(&out_path, e))?;
        debug!(tile = i, path = %out_path.display(), "tile saved");
        written.push(out_path);
    }
    info!(
        source = %image_path.display(),
        tiles = written.len(),
        %order,
        "image split"
    );
    Ok(written)
}
