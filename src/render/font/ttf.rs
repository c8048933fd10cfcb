//! Scalable (TrueType/OpenType) faces.
//!
//! Glyph outlines are rasterized with ab_glyph and alpha-blended straight
//! onto the RGB canvas. Sizes are em sizes in pixels, converted to
//! ab_glyph's ascent-to-descent scale through the font's units per em.

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};

use super::{Face, blend_pixel};
use crate::error::{Result, TextCanvasError};

/// Glyph whose bottom edge defines the line extent.
const REFERENCE_GLYPH: char = 'A';

/// A font file loaded at a fixed pixel size.
pub struct ScalableFace {
    font: FontVec,
    scale: PxScale,
    label: String,
}

impl ScalableFace {
    /// Load the first face of a font file (collections use index 0).
    pub fn from_file(path: &Path, em_px: f32) -> Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .map_err(|e| TextCanvasError::Font(format!("{}: {}", path.display(), e)))?;

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_font(font, em_px, label))
    }

    /// Wrap an already parsed font.
    pub fn from_font(font: FontVec, em_px: f32, label: impl Into<String>) -> Self {
        let scale = em_to_scale(&font, em_px);
        Self {
            font,
            scale,
            label: label.into(),
        }
    }
}

/// Convert an em size in pixels to an ab_glyph scale.
fn em_to_scale(font: &impl Font, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(em_px * font.height_unscaled() / units),
        _ => PxScale::from(em_px),
    }
}

impl Face for ScalableFace {
    fn describe(&self) -> String {
        format!("{} @ {:.1}px", self.label, self.scale.y)
    }

    fn reference_extent(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let glyph = self
            .font
            .glyph_id(REFERENCE_GLYPH)
            .with_scale_and_position(self.scale, point(0.0, scaled.ascent()));

        match self.font.outline_glyph(glyph) {
            Some(outlined) => outlined.px_bounds().max.y.ceil().max(1.0) as u32,
            // No outline for the reference glyph: use the full line box
            None => (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32,
        }
    }

    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline_y = y as f32 + scaled.ascent();

        let mut caret_x = x as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(self.scale, point(caret_x, baseline_y));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let cx = px as i32 + bounds.min.x as i32;
                    let cy = py as i32 + bounds.min.y as i32;
                    blend_pixel(canvas, cx, cy, color, coverage);
                });
            }
        }
    }
}
