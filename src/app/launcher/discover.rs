//! Downloader executable discovery
//!
//! Browsers launch native hosts with a minimal environment, so `$PATH` is
//! useless here: the well-known pipx and Homebrew install locations are
//! probed directly, and spawned children get an explicitly rebuilt search
//! path covering the companion tools.

use std::path::{Path, PathBuf};

use crate::constants::downloader;

/// Locate the downloader executable in its fixed install locations
pub fn find_downloader() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(downloader::HOME_INSTALL_LOCATION));
    }
    candidates.extend(downloader::INSTALL_LOCATIONS.iter().map(PathBuf::from));

    candidates.into_iter().find(|path| is_executable_file(path))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Build the `PATH` value for spawned children.
///
/// The companion-tool directories come first, then any home-relative
/// entries, then whatever search path the host itself inherited.
pub fn augmented_path() -> String {
    let mut entries: Vec<String> = downloader::EXTRA_PATH_DIRS
        .iter()
        .map(|s| s.to_string())
        .collect();

    if let Some(home) = dirs::home_dir() {
        for rel in downloader::EXTRA_HOME_PATH_DIRS {
            entries.push(home.join(rel).to_string_lossy().into_owned());
        }
    }

    if let Ok(current) = std::env::var("PATH") {
        if !current.is_empty() {
            entries.push(current);
        }
    }

    entries.join(":")
}
