use image::GrayImage;
use serde::Serialize;

/// Axis-aligned box in pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InkBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl InkBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Bounding box of every pixel that differs from `background`
pub fn ink_bounds(img: &GrayImage, background: u8) -> Option<InkBox> {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0u32, 0u32);
    let mut any = false;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[0] == background {
            continue;
        }
        any = true;
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    any.then(|| InkBox::new(min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1))
}
