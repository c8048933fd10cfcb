//! Hex color parsing.
//!
//! Colors arrive as `#RRGGBB` or `RRGGBB` strings from the preferences file
//! and the host's color pickers. Anything else is rejected before a canvas is
//! allocated.

use image::Rgb;

use crate::error::{Result, TextCanvasError};

/// Parse a 6-digit hex RGB string, with or without a leading `#`.
///
/// ```
/// use textcanvas::render::color::parse_hex;
///
/// assert_eq!(parse_hex("#FF0000").unwrap().0, [255, 0, 0]);
/// assert_eq!(parse_hex("00ff7f").unwrap().0, [0, 255, 127]);
/// assert!(parse_hex("#FFF00").is_err());
/// ```
pub fn parse_hex(input: &str) -> Result<Rgb<u8>> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TextCanvasError::Color(format!(
            "'{}' is not a 6-digit hex RGB color",
            input
        )));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| TextCanvasError::Color(format!("'{}': {}", input, e)))
    };

    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
