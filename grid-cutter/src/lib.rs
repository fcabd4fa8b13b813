//! Grid helpers for preparing and inspecting image datasets
//!
//! Cutting a sheet into tiles, pasting tiles back into a sheet, and turning
//! model output tensors into viewable images.

use std::path::Path;

pub mod combine;
pub mod error;
pub mod grid;
pub mod split;
pub mod tensor;

pub use combine::{ImageKind, combine_and_save, combine_images, matching_images};
pub use error::CutError;
pub use grid::{Order, grid_cells};
pub use split::{split_and_save, split_image, tile_size};
pub use tensor::{ArrayStats, save_image, tensor_to_image};

/// Create every directory that does not exist yet
pub fn ensure_dirs<I, P>(paths: I) -> Result<(), CutError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(|e| CutError::io(path, e))?;
    }
    Ok(())
}
