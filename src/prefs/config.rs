//! # Preferences Record
//!
//! The flat record persisted between runs.
//!
//! ```json
//! {
//!   "theme": "light",
//!   "default_format": "png",
//!   "font_size": 24,
//!   "bg_color": "#FFFFFF",
//!   "font_color": "#000000",
//!   "image_width": 800,
//!   "history": []
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, TextCanvasError};
use crate::render::{Numeric, OutputFormat};

/// Number of export paths kept in `history`.
pub const HISTORY_LIMIT: usize = 10;

pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_IMAGE_WIDTH: u32 = 800;

/// Host UI color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = TextCanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(TextCanvasError::InvalidInput(format!(
                "unknown theme '{}', expected light or dark",
                other
            ))),
        }
    }
}

/// User preferences.
///
/// Loading is forgiving per field: a missing key or a value of the wrong
/// shape takes that field's default and leaves the other fields intact.
/// Colors are kept as strings and only validated when an image is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(deserialize_with = "theme_or_default")]
    pub theme: Theme,
    #[serde(deserialize_with = "format_or_default")]
    pub default_format: OutputFormat,
    #[serde(deserialize_with = "font_size_or_default")]
    pub font_size: u32,
    #[serde(deserialize_with = "bg_color_or_default")]
    pub bg_color: String,
    #[serde(deserialize_with = "font_color_or_default")]
    pub font_color: String,
    #[serde(deserialize_with = "image_width_or_default")]
    pub image_width: u32,
    /// Paths of exported images, oldest first.
    #[serde(deserialize_with = "history_or_default")]
    pub history: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            default_format: OutputFormat::Png,
            font_size: DEFAULT_FONT_SIZE,
            bg_color: "#FFFFFF".to_string(),
            font_color: "#000000".to_string(),
            image_width: DEFAULT_IMAGE_WIDTH,
            history: Vec::new(),
        }
    }
}

impl Configuration {
    /// Append an export path, dropping the oldest entries past [`HISTORY_LIMIT`].
    pub fn push_history(&mut self, entry: impl Into<String>) {
        self.history.push(entry.into());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Reject records that would not load back unchanged.
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(TextCanvasError::Config(
                "font_size must be a positive integer".to_string(),
            ));
        }
        if self.image_width == 0 {
            return Err(TextCanvasError::Config(
                "image_width must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read one field as loose JSON, falling back to `default` when `parse`
/// rejects it.
fn field_or<'de, D, T>(
    deserializer: D,
    field: &str,
    default: T,
    parse: impl FnOnce(Value) -> Option<T>,
) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let shown = value.to_string();
    Ok(parse(value).unwrap_or_else(|| {
        tracing::warn!(field, value = %shown, "invalid preference value, using default");
        default
    }))
}

fn theme_or_default<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Theme, D::Error> {
    field_or(d, "theme", Theme::default(), |v| v.as_str()?.parse().ok())
}

fn format_or_default<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<OutputFormat, D::Error> {
    field_or(d, "default_format", OutputFormat::default(), |v| v.as_str()?.parse().ok())
}

fn positive(value: Value, field: &str) -> Option<u32> {
    serde_json::from_value::<Numeric>(value)
        .ok()?
        .to_positive(field)
        .ok()
}

fn font_size_or_default<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    field_or(d, "font_size", DEFAULT_FONT_SIZE, |v| positive(v, "font_size"))
}

fn image_width_or_default<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    field_or(d, "image_width", DEFAULT_IMAGE_WIDTH, |v| positive(v, "image_width"))
}

fn bg_color_or_default<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    let fallback = Configuration::default().bg_color;
    field_or(d, "bg_color", fallback, |v| v.as_str().map(str::to_string))
}

fn font_color_or_default<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<String, D::Error> {
    let fallback = Configuration::default().font_color;
    field_or(d, "font_color", fallback, |v| v.as_str().map(str::to_string))
}

fn history_or_default<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<String>, D::Error> {
    field_or(d, "history", Vec::new(), |v| serde_json::from_value(v).ok())
}
