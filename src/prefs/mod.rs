//! # Preferences
//!
//! Loads the user's settings at startup and writes them back on demand.
//! Reading never fails: a missing, unreadable or malformed file yields the
//! default record. Writing replaces the whole file.
//!
//! ## Usage
//!
//! ```no_run
//! use textcanvas::prefs::{PreferencesStore, Theme};
//!
//! let mut store = PreferencesStore::open("config.json");
//! let mut config = store.current().clone();
//! config.theme = Theme::Dark;
//! store.save(config)?;
//! # Ok::<(), textcanvas::TextCanvasError>(())
//! ```

pub mod config;
pub mod store;

pub use config::{Configuration, HISTORY_LIMIT, Theme};
pub use store::{DEFAULT_CONFIG_FILE, PreferencesStore, load_from};
