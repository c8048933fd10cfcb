//! # Error Types
//!
//! This module defines error types used throughout the textcanvas library.
//! The invocation surface in [`crate::api`] turns these into outcome values
//! using their `Display` text.

use thiserror::Error;

/// Main error type for textcanvas operations
#[derive(Debug, Error)]
pub enum TextCanvasError {
    /// Malformed hex color string
    #[error("Invalid color: {0}")]
    Color(String),

    /// Invalid render parameter (size, width, text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Font file could not be read or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding or data URI error
    #[error("Encode error: {0}")]
    Encode(String),

    /// Preferences serialization error
    #[error("Config error: {0}")]
    Config(String),

    /// Save dialog unavailable or failed
    #[error("Dialog error: {0}")]
    Dialog(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, TextCanvasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert!(TextCanvasError::Color("x".into()).to_string().starts_with("Invalid color:"));
        assert!(
            TextCanvasError::InvalidInput("x".into())
                .to_string()
                .starts_with("Invalid input:")
        );
        assert!(TextCanvasError::Dialog("x".into()).to_string().starts_with("Dialog error:"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TextCanvasError = io.into();
        assert!(matches!(err, TextCanvasError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
