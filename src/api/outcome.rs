//! Outcome values returned to the host.
//!
//! Every invocation returns one of these instead of an error. They serialize
//! to the JSON shapes a UI layer expects:
//!
//! | Outcome | Success | Failure |
//! |---------|---------|---------|
//! | [`Outcome`] | `{success, message}` | `{success, message}` |
//! | [`ImageOutcome`] | `{success, image_data}` | `{success, message}` |
//! | [`PathOutcome`] | `{success, path}` | `{success, path: null, message}` |

use std::path::PathBuf;

use serde::Serialize;

use crate::error::TextCanvasError;

/// Result of an operation that only reports a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(context: &str, error: &TextCanvasError) -> Self {
        Self {
            success: false,
            message: format!("{}: {}", context, error),
        }
    }
}

/// Result of an image render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImageOutcome {
    pub fn ok(image_data: String) -> Self {
        Self {
            success: true,
            image_data: Some(image_data),
            message: None,
        }
    }

    pub fn failed(context: &str, error: &TextCanvasError) -> Self {
        Self {
            success: false,
            image_data: None,
            message: Some(format!("{}: {}", context, error)),
        }
    }
}

/// Result of asking the host for a save location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathOutcome {
    pub success: bool,
    /// `None` when the user cancelled.
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PathOutcome {
    pub fn chosen(path: Option<PathBuf>) -> Self {
        Self {
            success: true,
            path,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            message: Some(message.into()),
        }
    }
}
