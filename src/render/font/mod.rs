//! Font resolution for the rasterizer.
//!
//! A render asks for a face at twice the requested size. Candidates are
//! tried in order; the first scalable face that loads wins. When none
//! loads, the built-in Spleen bitmap face is used at its native size so a
//! render never fails for lack of fonts.
//!
//! | Candidate | Source |
//! |-----------|--------|
//! | `simsun.ttc` | system font directories |
//! | `arial.ttf` | system font directories |
//! | built-in | Spleen 12x24, compiled in |

pub mod bitmap;
pub mod discovery;
pub mod ttf;

use std::path::PathBuf;

use image::{Rgb, RgbImage};

pub use bitmap::BitmapFace;
pub use ttf::ScalableFace;

use crate::error::Result;

/// Preferred faces, in order, before the built-in fallback.
pub const PREFERRED_FONTS: &[&str] = &["simsun.ttc", "arial.ttf"];

/// A loaded font able to measure and draw single lines of text.
pub trait Face {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Distance from the top of a line to the bottom of the reference glyph `A`.
    fn reference_extent(&self) -> u32;

    /// Draw `text` with the top of its line box at (`x`, `y`).
    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>);
}

/// One entry in the font fallback list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSpec {
    /// Font file at an explicit path.
    Path(PathBuf),
    /// File name looked up in the platform font directories.
    System(String),
    /// The compiled-in bitmap face.
    Builtin,
}

impl FontSpec {
    /// Default candidate list: the preferred system faces, then the built-in face.
    pub fn defaults() -> Vec<FontSpec> {
        PREFERRED_FONTS
            .iter()
            .map(|name| FontSpec::System(name.to_string()))
            .chain(std::iter::once(FontSpec::Builtin))
            .collect()
    }

    /// Try to load this candidate. `Ok(None)` means the font is not installed.
    pub fn load(&self, em_px: f32) -> Result<Option<Box<dyn Face>>> {
        match self {
            FontSpec::Path(path) => {
                if !path.is_file() {
                    return Ok(None);
                }
                Ok(Some(Box::new(ScalableFace::from_file(path, em_px)?)))
            }
            FontSpec::System(name) => match discovery::find_font(name) {
                Some(path) => Ok(Some(Box::new(ScalableFace::from_file(&path, em_px)?))),
                None => Ok(None),
            },
            FontSpec::Builtin => Ok(Some(Box::new(BitmapFace::new()))),
        }
    }
}

/// Resolve the first loadable face from `candidates`.
///
/// Load errors are logged and skipped. The bitmap face is returned when the
/// list is exhausted.
pub fn resolve(candidates: &[FontSpec], em_px: f32) -> Box<dyn Face> {
    for spec in candidates {
        match spec.load(em_px) {
            Ok(Some(face)) => {
                tracing::debug!(face = %face.describe(), "resolved font");
                return face;
            }
            Ok(None) => tracing::debug!(?spec, "font not available"),
            Err(e) => tracing::warn!(?spec, error = %e, "failed to load font"),
        }
    }

    Box::new(BitmapFace::new())
}

/// Blend `color` into the canvas pixel at (`x`, `y`) by `coverage`.
/// Out-of-bounds coordinates are ignored.
pub(crate) fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }

    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        let blended = *dst as f32 + (src as f32 - *dst as f32) * coverage;
        *dst = blended.round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_end_with_builtin() {
        let defaults = FontSpec::defaults();
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults[0], FontSpec::System("simsun.ttc".into()));
        assert_eq!(defaults[1], FontSpec::System("arial.ttf".into()));
        assert_eq!(defaults.last(), Some(&FontSpec::Builtin));
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let spec = FontSpec::Path(PathBuf::from("/definitely/not/here.ttf"));
        assert!(spec.load(48.0).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_font_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let spec = FontSpec::Path(path.clone());
        assert!(spec.load(48.0).is_err());

        let face = resolve(&[FontSpec::Path(path)], 48.0);
        assert!(face.describe().contains("spleen"));
    }

    #[test]
    fn test_empty_candidates_fall_back_to_bitmap() {
        let face = resolve(&[], 48.0);
        assert_eq!(face.reference_extent(), BitmapFace::CELL_HEIGHT);
    }

    #[test]
    fn test_blend_pixel() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        blend_pixel(&mut canvas, 0, 0, Rgb([0, 0, 0]), 1.0);
        blend_pixel(&mut canvas, 1, 0, Rgb([0, 0, 0]), 0.5);
        blend_pixel(&mut canvas, -1, 5, Rgb([0, 0, 0]), 1.0);
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(1, 0), &Rgb([128, 128, 128]));
        assert_eq!(canvas.get_pixel(1, 1), &Rgb([255, 255, 255]));
    }
}
