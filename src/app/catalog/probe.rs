//! Local "already downloaded" probing
//!
//! The downloader writes albums to `<output>/<artist>/<album>/`. An album
//! counts as downloaded when that directory holds at least one known audio
//! file. Probe failures (missing directory, permission denied, unreachable
//! network share) degrade to `false`; a fetch must never fail because the
//! output volume is inaccessible.

use std::path::Path;

use crate::constants::output::AUDIO_EXTENSIONS;

/// Whether an album already exists in the output directory
pub fn album_downloaded(output_path: &Path, artist_name: &str, album_name: &str) -> bool {
    let album_dir = output_path.join(artist_name).join(album_name);
    let entries = match std::fs::read_dir(&album_dir) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
                return true;
            }
        }
    }
    false
}
