//! Turning model output into images

use std::fmt;
use std::path::Path;

use image::{DynamicImage, RgbImage, imageops::FilterType};

use crate::error::CutError;

/// Convert the first image of an NCHW tensor with values in `[-1, 1]`
/// into an RGB image
///
/// Single channel tensors are repeated over the three channels. Values are
/// mapped to `(v + 1) / 2 * 255`, clamped and truncated to `u8`.
pub fn tensor_to_image(data: &[f32], shape: [usize; 4]) -> Result<RgbImage, CutError> {
    let [n, c, h, w] = shape;
    let bad_shape = || CutError::TensorShape {
        shape,
        len: data.len(),
    };
    let plane = h.checked_mul(w).ok_or_else(bad_shape)?;
    let needed = c.checked_mul(plane).ok_or_else(bad_shape)?;
    if n == 0 || data.len() < needed {
        return Err(bad_shape());
    }
    if c != 1 && c != 3 {
        return Err(CutError::Channels(c));
    }
    let width = u32::try_from(w).map_err(|_| bad_shape())?;
    let height = u32::try_from(h).map_err(|_| bad_shape())?;

    let first = &data[..needed];
    let to_u8 = |v: f32| ((v + 1.0) / 2.0 * 255.0).clamp(0.0, 255.0) as u8;
    let mut out = Vec::with_capacity(plane * 3);
    for i in 0..plane {
        for ch in 0..3 {
            let src = if c == 1 { 0 } else { ch };
            out.push(to_u8(first[src * plane + i]));
        }
    }
    RgbImage::from_raw(width, height, out).ok_or_else(bad_shape)
}

/// Save an image, stretching it by `aspect_ratio` first
///
/// A ratio above 1 makes the image taller, below 1 wider.
pub fn save_image(img: &RgbImage, path: &Path, aspect_ratio: f32) -> Result<(), CutError> {
    if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
        return Err(CutError::AspectRatio(aspect_ratio));
    }
    let (w, h) = img.dimensions();
    let mut out = DynamicImage::ImageRgb8(img.clone());
    if aspect_ratio > 1.0 {
        out = out.resize_exact(w, (h as f32 * aspect_ratio) as u32, FilterType::CatmullRom);
    } else if aspect_ratio < 1.0 {
        out = out.resize_exact((w as f32 / aspect_ratio) as u32, h, FilterType::CatmullRom);
    }
    out.save(path).map_err(|e| CutError::image(path, e))
}

/// Summary statistics of a flat array
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub std: f64,
    pub len: usize,
}

impl ArrayStats {
    pub fn of<T: Copy + Into<f64>>(values: &[T]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted: Vec<f64> = values.iter().map(|&v| v.into()).collect();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        let mean = sorted.iter().sum::<f64>() / len as f64;
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len as f64;
        let median = if len % 2 == 1 {
            sorted[len / 2]
        } else {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        };

        Some(Self {
            mean,
            min: sorted[0],
            max: sorted[len - 1],
            median,
            std: var.sqrt(),
            len,
        })
    }
}

impl fmt::Display for ArrayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean = {:3.3}, min = {:3.3}, max = {:3.3}, median = {:3.3}, std={:3.3}",
            self.mean, self.min, self.max, self.median, self.std
        )
    }
}
