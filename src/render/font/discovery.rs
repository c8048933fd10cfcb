//! Locate font files by name in the platform font directories.

use std::path::{Path, PathBuf};

/// How deep below each font directory to search.
const MAX_DEPTH: u8 = 3;

/// Font directories for the current platform, most specific first.
#[allow(unused_mut)]
pub fn font_directories() -> Vec<PathBuf> {
    let mut dirs_found: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "windows")]
    {
        dirs_found.push(PathBuf::from(r"C:\Windows\Fonts"));
        if let Some(local) = dirs::data_local_dir() {
            dirs_found.push(local.join(r"Microsoft\Windows\Fonts"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        dirs_found.push(PathBuf::from("/System/Library/Fonts"));
        dirs_found.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = dirs::home_dir() {
            dirs_found.push(home.join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        dirs_found.push(PathBuf::from("/usr/share/fonts"));
        dirs_found.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = dirs::home_dir() {
            dirs_found.push(home.join(".fonts"));
            dirs_found.push(home.join(".local/share/fonts"));
        }
    }

    dirs_found
}

/// Find `file_name` (case-insensitive) in the platform font directories.
pub fn find_font(file_name: &str) -> Option<PathBuf> {
    find_in(&font_directories(), file_name)
}

/// Find `file_name` (case-insensitive) below any of `roots`, in order.
pub fn find_in(roots: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    roots
        .iter()
        .filter(|root| root.is_dir())
        .find_map(|root| scan(root, file_name, 0))
}

fn scan(dir: &Path, file_name: &str, depth: u8) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    // Directory order is filesystem-dependent; sort for stable results
    entries.sort();

    let matches_name = |path: &Path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(file_name))
    };

    if let Some(hit) = entries.iter().find(|p| p.is_file() && matches_name(p)) {
        return Some(hit.clone());
    }

    if depth >= MAX_DEPTH {
        return None;
    }

    entries
        .iter()
        .filter(|p| p.is_dir())
        .find_map(|sub| scan(sub, file_name, depth + 1))
}
