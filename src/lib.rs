//! # textcanvas - Text to Image Rendering
//!
//! textcanvas renders plain multi-paragraph text into PNG, JPEG or BMP images
//! and remembers the user's settings between runs. It provides:
//!
//! - **Rasterizer**: 2x supersampled drawing, paragraph-aware wrapping,
//!   Lanczos downscaling and base64 data URIs
//! - **Font fallback**: preferred system faces, then a built-in bitmap face
//! - **Preferences**: a JSON file that degrades to defaults when missing
//! - **Invocation surface**: outcome-returning calls for a hosting shell
//!
//! ## Quick Start
//!
//! ```no_run
//! use textcanvas::api::{Api, ImageRequest};
//!
//! let mut api = Api::open("config.json");
//! let config = api.load_config();
//!
//! let outcome = api.generate_image(&ImageRequest::new(
//!     "Hello\n\nWorld",
//!     "png",
//!     config.font_size,
//!     "#FFFFFF",
//!     "#000000",
//!     800,
//! ));
//! assert!(outcome.success);
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Layout, fonts, drawing and encoding |
//! | [`prefs`] | Preferences record and file store |
//! | [`api`] | Host-facing calls returning outcome values |
//! | [`error`] | Error types |

pub mod api;
pub mod error;
pub mod prefs;
pub mod render;

// Re-exports for convenience
pub use api::Api;
pub use error::{Result, TextCanvasError};
pub use prefs::{Configuration, PreferencesStore};
pub use render::{Rasterizer, RenderRequest};
