//! # Rendering Module
//!
//! Turns plain multi-paragraph text into an encoded raster image.
//!
//! ## Pipeline
//!
//! 1. Parse colors and numbers ([`request`], [`color`])
//! 2. Resolve a face at 2x the font size ([`font`])
//! 3. Split and wrap paragraphs, estimate height ([`layout`])
//! 4. Draw onto a 2x canvas filled with the background
//! 5. Downscale with Lanczos3 and encode ([`encode`])
//!
//! Drawing at twice the output size and filtering down gives smooth edges
//! even with the bitmap fallback face.
//!
//! ## Usage Example
//!
//! ```
//! use image::Rgb;
//! use textcanvas::render::{Rasterizer, RenderRequest, encode::OutputFormat};
//!
//! let request = RenderRequest::new(
//!     "Hello\n\nWorld",
//!     OutputFormat::Png,
//!     24,
//!     Rgb([255, 255, 255]),
//!     Rgb([0, 0, 0]),
//!     800,
//! );
//!
//! let image = Rasterizer::builtin_only().render(&request)?;
//! assert_eq!(image.width, 800);
//! assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
//! # Ok::<(), textcanvas::TextCanvasError>(())
//! ```

pub mod color;
pub mod encode;
pub mod font;
pub mod layout;
pub mod request;

use image::{RgbImage, imageops::FilterType};

pub use encode::OutputFormat;
pub use font::{Face, FontSpec};
pub use layout::{Paragraph, WrappedLayout};
pub use request::{Numeric, RenderRequest};

use crate::error::{Result, TextCanvasError};

/// Upper bound on oversampled canvas pixels for a single render.
pub const MAX_CANVAS_PIXELS: u64 = 256 * 1024 * 1024;

/// An encoded image ready to be shown or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl RenderedImage {
    /// `data:image/<format>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        encode::to_data_uri(self.format, &self.bytes)
    }
}

/// Text-to-image renderer with an ordered font fallback list.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    fonts: Vec<FontSpec>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            fonts: FontSpec::defaults(),
        }
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `fonts` as the candidate list. The built-in face is appended
    /// when missing so resolution always succeeds.
    pub fn with_fonts(mut fonts: Vec<FontSpec>) -> Self {
        if !fonts.contains(&FontSpec::Builtin) {
            fonts.push(FontSpec::Builtin);
        }
        Self { fonts }
    }

    /// Skip font discovery entirely; output depends only on the inputs.
    pub fn builtin_only() -> Self {
        Self::with_fonts(vec![FontSpec::Builtin])
    }

    /// Try `spec` before every existing candidate.
    pub fn prepend_font(&mut self, spec: FontSpec) {
        self.fonts.insert(0, spec);
    }

    pub fn fonts(&self) -> &[FontSpec] {
        &self.fonts
    }

    /// Compute the wrapped layout `request` would be drawn with.
    pub fn layout(&self, request: &RenderRequest) -> Result<WrappedLayout> {
        request.validate()?;
        let wrap_width = layout::wrap_width(request.width, request.font_size)?;
        let face = self.resolve_face(request);
        Ok(layout_for(face.as_ref(), &request.text, wrap_width))
    }

    /// Render and encode `request`.
    #[tracing::instrument(
        skip_all,
        fields(format = %request.format, font_size = request.font_size, width = request.width)
    )]
    pub fn render(&self, request: &RenderRequest) -> Result<RenderedImage> {
        request.validate()?;
        let wrap_width = layout::wrap_width(request.width, request.font_size)?;

        let face = self.resolve_face(request);
        let wrapped = layout_for(face.as_ref(), &request.text, wrap_width);

        let canvas_width = request.width * layout::SCALE;
        let canvas_height = wrapped.canvas_height;
        if canvas_width as u64 * canvas_height as u64 > MAX_CANVAS_PIXELS {
            return Err(TextCanvasError::InvalidInput(format!(
                "text too long to render: {}x{} canvas exceeds the size limit",
                canvas_width, canvas_height
            )));
        }

        let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, request.background);
        for (y, line) in wrapped.placed_lines() {
            face.draw_line(
                &mut canvas,
                layout::TEXT_LEFT as i32,
                y as i32,
                line,
                request.foreground,
            );
        }

        let final_height = wrapped.final_height();
        let output =
            image::imageops::resize(&canvas, request.width, final_height, FilterType::Lanczos3);
        drop(canvas);

        let bytes = encode::encode(&output, request.format)?;

        tracing::debug!(
            face = %face.describe(),
            paragraphs = wrapped.paragraphs.len(),
            height = final_height,
            bytes = bytes.len(),
            "rendered image"
        );

        Ok(RenderedImage {
            format: request.format,
            width: output.width(),
            height: output.height(),
            bytes,
        })
    }

    fn resolve_face(&self, request: &RenderRequest) -> Box<dyn Face> {
        let em_px = (request.font_size * layout::SCALE) as f32;
        font::resolve(&self.fonts, em_px)
    }
}

fn layout_for(face: &dyn Face, text: &str, wrap_width: usize) -> WrappedLayout {
    let line_height = face.reference_extent() + layout::LINE_SPACING;
    layout::layout(text, wrap_width, line_height)
}
