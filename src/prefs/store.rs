//! File-backed preferences store.

use std::fs;
use std::path::{Path, PathBuf};

use super::config::Configuration;
use crate::error::{Result, TextCanvasError};

/// Fixed relative location of the preferences file.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Owns the current [`Configuration`] and the file it persists to.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Configuration,
}

impl PreferencesStore {
    /// Open the store at `path`, loading the file or falling back to defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_from(&path);
        Self { path, current }
    }

    pub fn current(&self) -> &Configuration {
        &self.current
    }

    /// Re-read the file, replacing the current configuration.
    pub fn reload(&mut self) -> &Configuration {
        self.current = load_from(&self.path);
        &self.current
    }

    /// Persist `config`, replacing the file entirely.
    ///
    /// Records that would not load back unchanged are rejected before
    /// anything is written. The in-memory configuration is replaced only
    /// once the write succeeds.
    pub fn save(&mut self, config: Configuration) -> Result<()> {
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "refusing to save invalid preferences");
            return Err(e);
        }

        match write_to(&self.path, &config) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "preferences saved");
                self.current = config;
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to save preferences"
                );
                Err(e)
            }
        }
    }

    /// Append `path` to the export history and persist.
    pub fn record_export(&mut self, path: impl Into<String>) -> Result<()> {
        let mut next = self.current.clone();
        next.push_history(path);
        self.save(next)
    }
}

/// Load preferences from `path`. Never fails: any problem yields defaults.
pub fn load_from(path: &Path) -> Configuration {
    if !path.exists() {
        tracing::info!(path = %path.display(), "preferences file not found, using defaults");
        return Configuration::default();
    }

    match read_from(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "preferences loaded");
            config
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "failed to load preferences, using defaults"
            );
            Configuration::default()
        }
    }
}

fn read_from(path: &Path) -> Result<Configuration> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| TextCanvasError::Config(e.to_string()))
}

fn write_to(path: &Path, config: &Configuration) -> Result<()> {
    let json =
        serde_json::to_string_pretty(config).map_err(|e| TextCanvasError::Config(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
