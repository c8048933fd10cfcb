//! Render inputs.
//!
//! Hosts hand over numbers the way their form widgets hold them: integers,
//! floats or strings. [`Numeric`] accepts all three and [`RenderRequest`]
//! turns them into validated, typed parameters.

use image::Rgb;
use serde::{Deserialize, Serialize};

use super::color;
use super::encode::OutputFormat;
use crate::error::{Result, TextCanvasError};

/// Largest accepted output width in pixels.
pub const MAX_WIDTH: u32 = 16_384;

/// Largest accepted font size in points.
pub const MAX_FONT_SIZE: u32 = 1_024;

/// A loosely typed numeric input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Coerce to a positive integer. Floats are truncated toward zero.
    pub fn to_positive(&self, field: &str) -> Result<u32> {
        let value = match self {
            Numeric::Int(n) => *n,
            Numeric::Float(f) if f.is_finite() => f.trunc() as i64,
            Numeric::Float(f) => {
                return Err(TextCanvasError::InvalidInput(format!(
                    "{} must be a number, got {}",
                    field, f
                )));
            }
            Numeric::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                TextCanvasError::InvalidInput(format!("{} must be a number, got '{}'", field, s))
            })?,
        };

        if value <= 0 || value > u32::MAX as i64 {
            return Err(TextCanvasError::InvalidInput(format!(
                "{} must be positive, got {}",
                field, value
            )));
        }

        Ok(value as u32)
    }
}

impl From<u32> for Numeric {
    fn from(n: u32) -> Self {
        Numeric::Int(n as i64)
    }
}

impl From<i32> for Numeric {
    fn from(n: i32) -> Self {
        Numeric::Int(n as i64)
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::Int(n)
    }
}

impl From<f64> for Numeric {
    fn from(f: f64) -> Self {
        Numeric::Float(f)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

impl From<String> for Numeric {
    fn from(s: String) -> Self {
        Numeric::Text(s)
    }
}

/// Validated parameters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub format: OutputFormat,
    /// Font size in points (rendered at twice this in oversampled space).
    pub font_size: u32,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    /// Output width in pixels.
    pub width: u32,
}

impl RenderRequest {
    pub fn new(
        text: impl Into<String>,
        format: OutputFormat,
        font_size: u32,
        background: Rgb<u8>,
        foreground: Rgb<u8>,
        width: u32,
    ) -> Self {
        Self {
            text: text.into(),
            format,
            font_size,
            background,
            foreground,
            width,
        }
    }

    /// Build a request from untyped host input.
    ///
    /// Colors are checked first, then numbers. Unknown formats become PNG.
    pub fn parse(
        text: &str,
        format: &str,
        font_size: &Numeric,
        bg_color: &str,
        font_color: &str,
        width: &Numeric,
    ) -> Result<Self> {
        let background = color::parse_hex(bg_color)?;
        let foreground = color::parse_hex(font_color)?;
        let font_size = font_size.to_positive("font size")?;
        let width = width.to_positive("image width")?;

        let request = Self::new(
            text,
            OutputFormat::from_name_or_png(format),
            font_size,
            background,
            foreground,
            width,
        );
        request.validate()?;
        Ok(request)
    }

    /// Check size limits.
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(TextCanvasError::InvalidInput(format!(
                "font size must be between 1 and {}, got {}",
                MAX_FONT_SIZE, self.font_size
            )));
        }
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(TextCanvasError::InvalidInput(format!(
                "image width must be between 1 and {}, got {}",
                MAX_WIDTH, self.width
            )));
        }
        Ok(())
    }
}
