//! Save-location dialog provided by the host window.

use std::path::PathBuf;

use crate::error::Result;

/// One entry in a save dialog's file-type filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub patterns: Vec<String>,
}

impl FileFilter {
    /// Filters for a suggested file name: its own extension, then all files.
    ///
    /// The extension is whatever follows the last `.`; a name without a dot
    /// is used whole.
    pub fn for_filename(filename: &str) -> Vec<FileFilter> {
        let extension = filename.rsplit('.').next().unwrap_or(filename);
        vec![
            FileFilter {
                label: format!("Image Files (*.{})", extension),
                patterns: vec![format!("*.{}", extension)],
            },
            FileFilter {
                label: "All Files (*.*)".to_string(),
                patterns: vec!["*.*".to_string()],
            },
        ]
    }
}

/// A native "save file" dialog.
pub trait SaveDialog {
    /// Ask for a destination. `Ok(None)` means the user cancelled.
    fn choose(&self, suggested_name: &str, filters: &[FileFilter]) -> Result<Option<PathBuf>>;
}
