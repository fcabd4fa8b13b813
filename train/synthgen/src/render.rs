use std::path::PathBuf;

use ab_glyph::{Font, FontArc, PxScale};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;

pub const BACKGROUND: u8 = 255;
pub const INK: u8 = 0;
/// Largest accepted `--jitter`
pub const MAX_JITTER: u32 = 1024;

pub struct RenderCfg {
    pub out_dir: PathBuf, // "trainB"
    pub size: u32,        // canvas side and font size
    pub x_offset: i32,
    pub y_offset: i32,
    pub jitter: u32, // max random shift per axis, 0 = off
    pub seed: u64,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("trainB"),
            size: 128,
            x_offset: 0,
            y_offset: 0,
            jitter: 0,
            seed: 0,
        }
    }
}

/// Pixel scale for a font size given in em units, as font tools count it
pub fn em_scale(font: &FontArc, size: f32) -> PxScale {
    font.pt_to_px_scale(size).unwrap_or(PxScale::from(size))
}

/// Draw `ch` in black on a white `size x size` canvas, top-left at `(x, y)`
pub fn create_char_img(ch: char, font: &FontArc, size: u32, x: i32, y: i32) -> GrayImage {
    let mut img = GrayImage::from_pixel(size, size, Luma([BACKGROUND]));
    let mut buf = [0u8; 4];
    draw_text_mut(
        &mut img,
        Luma([INK]),
        x,
        y,
        em_scale(font, size as f32),
        font,
        ch.encode_utf8(&mut buf),
    );
    img
}
