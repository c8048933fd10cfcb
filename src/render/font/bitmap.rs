//! Built-in bitmap face.
//!
//! Uses the Spleen 12x24 font at its native size. It is the last resort of
//! the fallback chain, so it ignores the requested size and never fails:
//! characters Spleen lacks are drawn as an outlined box.

use image::{Rgb, RgbImage};
use spleen_font::{FONT_12X24, PSF2Font};

use super::{Face, blend_pixel};

/// Spleen 12x24 drawn 1:1 onto the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFace;

impl BitmapFace {
    pub const CELL_WIDTH: u32 = 12;
    pub const CELL_HEIGHT: u32 = 24;

    pub fn new() -> Self {
        Self
    }

    /// Rasterize one character into a cell-sized 0/1 bitmap.
    pub fn glyph(&self, ch: char) -> Vec<u8> {
        let width = Self::CELL_WIDTH as usize;
        let height = Self::CELL_HEIGHT as usize;
        let mut glyph = vec![0u8; width * height];

        let mut utf8 = [0u8; 4];
        let encoded = ch.encode_utf8(&mut utf8);

        let mut found = false;
        if let Ok(mut spleen) = PSF2Font::new(FONT_12X24) {
            if let Some(spleen_glyph) = spleen.glyph_for_utf8(encoded.as_bytes()) {
                found = true;
                for (row_y, row) in spleen_glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if row_y < height && col_x < width {
                            glyph[row_y * width + col_x] = u8::from(on);
                        }
                    }
                }
            }
        }

        if !found {
            draw_box(&mut glyph, width, height);
        }

        glyph
    }
}

impl Face for BitmapFace {
    fn describe(&self) -> String {
        "spleen 12x24 (built-in)".to_string()
    }

    fn reference_extent(&self) -> u32 {
        Self::CELL_HEIGHT
    }

    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let width = Self::CELL_WIDTH as usize;
        let mut cell_x = x;

        for ch in text.chars() {
            if ch.is_whitespace() {
                cell_x += Self::CELL_WIDTH as i32;
                continue;
            }

            let glyph = self.glyph(ch);
            for (idx, &on) in glyph.iter().enumerate() {
                if on != 0 {
                    let gx = (idx % width) as i32;
                    let gy = (idx / width) as i32;
                    blend_pixel(canvas, cell_x + gx, y + gy, color, 1.0);
                }
            }
            cell_x += Self::CELL_WIDTH as i32;
        }
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
