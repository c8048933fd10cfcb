//! # Invocation Surface
//!
//! The methods a hosting shell binds to its UI: load and save preferences,
//! render an image, and pick a save location. Each call returns an outcome
//! value; nothing here returns an error or panics on bad input, so a failed
//! call leaves the application ready for the next one.
//!
//! ```no_run
//! use textcanvas::api::{Api, ImageRequest};
//!
//! let mut api = Api::open("config.json");
//! let config = api.load_config();
//!
//! let outcome = api.generate_image(&ImageRequest::from_config("Hello\n\nWorld", &config));
//! if let Some(uri) = outcome.image_data {
//!     println!("{} bytes of data URI", uri.len());
//! }
//! ```

pub mod dialog;
pub mod outcome;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use dialog::{FileFilter, SaveDialog};
pub use outcome::{ImageOutcome, Outcome, PathOutcome};

use crate::prefs::{Configuration, PreferencesStore};
use crate::render::{Numeric, Rasterizer, RenderRequest};

/// Render parameters as a UI layer sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub text: String,
    pub format: String,
    pub font_size: Numeric,
    pub bg_color: String,
    pub font_color: String,
    pub width: Numeric,
}

impl ImageRequest {
    pub fn new(
        text: impl Into<String>,
        format: impl Into<String>,
        font_size: impl Into<Numeric>,
        bg_color: impl Into<String>,
        font_color: impl Into<String>,
        width: impl Into<Numeric>,
    ) -> Self {
        Self {
            text: text.into(),
            format: format.into(),
            font_size: font_size.into(),
            bg_color: bg_color.into(),
            font_color: font_color.into(),
            width: width.into(),
        }
    }

    /// Pre-fill everything but the text from saved preferences.
    pub fn from_config(text: impl Into<String>, config: &Configuration) -> Self {
        Self::new(
            text,
            config.default_format.name(),
            config.font_size,
            config.bg_color.clone(),
            config.font_color.clone(),
            config.image_width,
        )
    }
}

/// Host-facing facade over the preferences store, rasterizer and save dialog.
pub struct Api {
    store: PreferencesStore,
    rasterizer: Rasterizer,
    dialog: Option<Box<dyn SaveDialog>>,
}

impl Api {
    pub fn new(store: PreferencesStore, rasterizer: Rasterizer) -> Self {
        Self {
            store,
            rasterizer,
            dialog: None,
        }
    }

    /// Open the preferences at `path` with the default font candidates.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(PreferencesStore::open(path), Rasterizer::default())
    }

    /// Attach the active window's save dialog.
    pub fn with_dialog(mut self, dialog: Box<dyn SaveDialog>) -> Self {
        self.dialog = Some(dialog);
        self
    }

    /// Replace or remove the save dialog (`None` = no active window).
    pub fn set_dialog(&mut self, dialog: Option<Box<dyn SaveDialog>>) {
        self.dialog = dialog;
    }

    pub fn rasterizer_mut(&mut self) -> &mut Rasterizer {
        &mut self.rasterizer
    }

    /// Read preferences from disk, or defaults.
    pub fn load_config(&mut self) -> Configuration {
        self.store.reload().clone()
    }

    /// Persist `config` as the new preferences.
    pub fn save_config(&mut self, config: Configuration) -> Outcome {
        match self.store.save(config) {
            Ok(()) => Outcome::ok("Configuration saved"),
            Err(e) => Outcome::failed("Failed to save configuration", &e),
        }
    }

    /// Render `request` to a data URI.
    #[tracing::instrument(skip_all, fields(format = %request.format))]
    pub fn generate_image(&self, request: &ImageRequest) -> ImageOutcome {
        let rendered = RenderRequest::parse(
            &request.text,
            &request.format,
            &request.font_size,
            &request.bg_color,
            &request.font_color,
            &request.width,
        )
        .and_then(|req| self.rasterizer.render(&req));

        match rendered {
            Ok(image) => {
                tracing::info!(width = image.width, height = image.height, "image generated");
                ImageOutcome::ok(image.to_data_uri())
            }
            Err(e) => {
                tracing::error!(error = %e, "image generation failed");
                ImageOutcome::failed("Failed to generate image", &e)
            }
        }
    }

    /// Ask the active window for a save location for `filename`.
    pub fn choose_save_path(&self, filename: &str) -> PathOutcome {
        let Some(dialog) = self.dialog.as_ref() else {
            tracing::error!("no active window for save dialog");
            return PathOutcome::failed("No active window");
        };

        let filters = FileFilter::for_filename(filename);
        match dialog.choose(filename, &filters) {
            Ok(path) => {
                tracing::info!(?path, "save path selected");
                PathOutcome::chosen(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "save dialog failed");
                PathOutcome::failed(format!("Failed to choose save path: {}", e))
            }
        }
    }

    /// Remember an exported file in the preferences history.
    pub fn record_export(&mut self, path: impl Into<String>) -> Outcome {
        match self.store.record_export(path) {
            Ok(()) => Outcome::ok("History updated"),
            Err(e) => Outcome::failed("Failed to update history", &e),
        }
    }
}
