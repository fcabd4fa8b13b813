use ab_glyph::FontArc;
use anyhow::Context;
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use rand_xoshiro::SplitMix64;
use tracing::{debug, info, warn};

use crate::{
    fonts::has_glyph,
    geom::ink_bounds,
    io::LabelsWriter,
    record::{GlyphRecord, SCHEMA},
    render::{BACKGROUND, MAX_JITTER, RenderCfg, create_char_img},
};

/// Glyph position for a seed, jittered when enabled
pub fn glyph_offset(config: &RenderCfg, seed: u64) -> (i32, i32) {
    let (x, y) = (config.x_offset, config.y_offset);
    if config.jitter == 0 {
        return (x, y);
    }
    let j = config.jitter.min(MAX_JITTER) as i32;
    let mut rng = SmallRng::seed_from_u64(seed);
    (
        x.saturating_add(rng.random_range(-j..=j)),
        y.saturating_add(rng.random_range(-j..=j)),
    )
}

/// Renders one image per character of a font
pub struct GlyphDatasetGenerator<'a> {
    pub font: FontArc,
    pub config: &'a RenderCfg,
    seeds: SplitMix64,
}

impl<'a> GlyphDatasetGenerator<'a> {
    pub fn new(font: FontArc, config: &'a RenderCfg) -> Self {
        Self {
            font,
            seeds: SplitMix64::seed_from_u64(config.seed),
            config,
        }
    }

    /// Render every character, returns the number of images written
    pub fn generate(&mut self, chars: &[char]) -> anyhow::Result<usize> {
        let mut labels = LabelsWriter::create(&self.config.out_dir)?;
        info!(
            chars = chars.len(),
            out_dir = %self.config.out_dir.display(),
            "generating font dataset"
        );

        for (i, &ch) in chars.iter().enumerate() {
            let seed = self.seeds.next_u64();
            let rec = self.render_one(i, ch, seed)?;
            labels.write_record(&rec)?;
        }

        labels.finalize()?;
        info!(images = chars.len(), "font dataset complete");
        Ok(chars.len())
    }

    fn render_one(&self, i: usize, ch: char, seed: u64) -> anyhow::Result<GlyphRecord> {
        let found = has_glyph(&self.font, ch);
        if !found {
            warn!(codepoint = %format!("U+{:04X}", ch as u32), "font has no glyph, rendering fallback");
        }

        let (x, y) = glyph_offset(self.config, seed);
        let img = create_char_img(ch, &self.font, self.config.size, x, y);

        let name = format!("font{i:04}.png");
        let path = self.config.out_dir.join(&name);
        img.save(&path)
            .with_context(|| format!("saving {}", path.display()))?;
        debug!(index = i, %ch, x, y, "glyph rendered");

        Ok(GlyphRecord {
            schema: SCHEMA,
            image: name,
            codepoint: ch as u32,
            ch,
            has_glyph: found,
            ink: ink_bounds(&img, BACKGROUND),
            seed,
        })
    }
}
