use std::path::Path;

use ab_glyph::{Font, FontArc};
use anyhow::{Context, bail};

pub fn load_font(path: &Path) -> anyhow::Result<FontArc> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    FontArc::try_from_vec(bytes).with_context(|| format!("parsing font {}", path.display()))
}

/// `glyph_id` falls back to `.notdef` (id 0) for unmapped characters
pub fn has_glyph(font: &FontArc, ch: char) -> bool {
    font.glyph_id(ch).0 != 0
}

/// Parse one code point written as hex: `4E00`, `U+4E00` or `0x4E00`
pub fn parse_codepoint(entry: &str) -> anyhow::Result<char> {
    let s = entry.trim();
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let value = u32::from_str_radix(hex, 16)
        .with_context(|| format!("invalid code point {entry:?}"))?;
    match char::from_u32(value) {
        Some(ch) => Ok(ch),
        None => bail!("code point {entry:?} is not a unicode scalar value"),
    }
}

/// Text character list: entries separated by whitespace or commas, `#`
/// comments run to the end of the line
pub fn parse_char_list_text(text: &str) -> anyhow::Result<Vec<char>> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|entry| !entry.is_empty())
        .map(parse_codepoint)
        .collect()
}

/// Load a character list, a JSON array of hex strings for `.json` files
/// and the text format otherwise
pub fn load_char_list(path: &Path) -> anyhow::Result<Vec<char>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading character list {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let entries: Vec<String> = serde_json::from_str(&text)
            .with_context(|| format!("parsing character list {}", path.display()))?;
        entries.iter().map(|e| parse_codepoint(e)).collect()
    } else {
        parse_char_list_text(&text)
    }
}
