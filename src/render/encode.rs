//! Output formats, image encoding and data URIs.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextCanvasError};

/// Encoded image formats the rasterizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Parse a format name, or fall back to PNG for anything unsupported.
    pub fn from_name_or_png(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(format = name, "unsupported format, using png");
            OutputFormat::Png
        })
    }

    /// Lowercase name, as used in data URIs and the preferences file.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// File extension for suggested file names.
    pub fn extension(self) -> &'static str {
        self.name()
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn mime_type(self) -> &'static str {
        self.image_format().to_mime_type()
    }
}

impl FromStr for OutputFormat {
    type Err = TextCanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(TextCanvasError::InvalidInput(format!(
                "unsupported image format '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode an RGB image to bytes in the given format.
pub fn encode(image: &RgbImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format.image_format())
        .map_err(|e| TextCanvasError::Encode(format!("failed to encode {}: {}", format, e)))?;
    Ok(bytes)
}

/// Wrap encoded bytes as `data:image/<format>;base64,<payload>`.
pub fn to_data_uri(format: OutputFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Split a data URI produced by [`to_data_uri`] back into format and bytes.
pub fn decode_data_uri(uri: &str) -> Result<(OutputFormat, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:image/")
        .ok_or_else(|| TextCanvasError::Encode("not an image data URI".to_string()))?;

    let (subtype, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| TextCanvasError::Encode("data URI is not base64 encoded".to_string()))?;

    let format: OutputFormat = subtype
        .parse()
        .map_err(|_| TextCanvasError::Encode(format!("unsupported data URI type '{}'", subtype)))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| TextCanvasError::Encode(format!("invalid base64 payload: {}", e)))?;

    Ok((format, bytes))
}
