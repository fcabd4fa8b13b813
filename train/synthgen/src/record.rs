use serde::Serialize;

use crate::geom::InkBox;

pub const SCHEMA: &str = "v1";

/// Manifest line of a rendered font glyph
#[derive(Serialize, Debug)]
pub struct GlyphRecord {
    pub schema: &'static str,
    pub image: String,
    pub codepoint: u32,
    #[serde(rename = "char")]
    pub ch: char,
    pub has_glyph: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ink: Option<InkBox>,
    pub seed: u64,
}

/// Manifest line of a handwriting sample taken from a GNT container
#[derive(Serialize, Debug)]
pub struct SampleRecord {
    pub schema: &'static str,
    pub image: String,
    pub tag_code: u16,
    pub width: u16,
    pub height: u16,
    pub source: String,
}
