//! Download launching
//!
//! Builds concrete item URLs from a request, pairs each with a fresh
//! progress log, and spawns one detached downloader process per URL.
//! Launching is fire-and-forget: the host's responsibility ends at
//! "process launched, log file recorded"; completion is only ever inferred
//! later from the log.
//!
//! Known gap: nothing deduplicates in-flight downloads. Re-requesting a
//! URL that is already downloading spawns a second, redundant child.

pub mod discover;
pub mod spawn;

pub use discover::find_downloader;

use std::path::PathBuf;

use tracing::info;

use crate::app::progress::ProgressLogManager;
use crate::app::urls::{MusicUrl, ResourceKind};
use crate::config::BridgeConfig;
use crate::constants::codecs;
use crate::errors::{LaunchError, LaunchResult};

/// Launch acknowledgement for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReceipt {
    pub message: String,
}

/// Spawns detached download processes
pub struct DownloadLauncher {
    logs: ProgressLogManager,
    project_root: PathBuf,
}

impl DownloadLauncher {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            logs: ProgressLogManager::new(config.resolved_progress_dir()),
            project_root: config.resolved_project_root(),
        }
    }

    /// Launch the whole URL, or the selected items under it.
    ///
    /// Returns as soon as the OS confirms creation of every child; the
    /// downloads themselves may run for hours.
    pub fn launch(
        &self,
        url: &str,
        selected_ids: Option<&[String]>,
        codec: &str,
    ) -> LaunchResult<LaunchReceipt> {
        let parsed = MusicUrl::classify(url)?;

        // An empty selection means "the whole URL", same as no selection
        let selection = selected_ids.filter(|ids| !ids.is_empty());

        // Discovery failure must not touch the log directory
        let executable = find_downloader().ok_or(LaunchError::ExecutableNotFound)?;

        let codec_args = codec_args(codec);
        let urls = expand_selection(&parsed, url, selection);
        let path_env = discover::augmented_path();

        for item_url in &urls {
            let log_path = self.logs.new_log_file().map_err(|source| {
                LaunchError::LogFile {
                    path: self.logs.dir().to_path_buf(),
                    source,
                }
            })?;

            let mut args = codec_args.clone();
            args.push(item_url.clone());
            spawn::spawn_detached(&executable, &args, &log_path, &self.project_root, &path_env)?;
        }

        info!("Launched {} download process(es)", urls.len());

        let label = format_label(codec);
        let message = if selection.is_some() {
            format!("Started downloading {} item(s) in {}", urls.len(), label)
        } else {
            format!("Download started in {}", label)
        };
        Ok(LaunchReceipt { message })
    }
}

/// Codec flags for one invocation; lossless additionally needs wrapper mode
fn codec_args(codec: &str) -> Vec<String> {
    let mut args = vec![codecs::SONG_CODEC_FLAG.to_string(), codec.to_string()];
    if codec == codecs::LOSSLESS {
        args.push(codecs::WRAPPER_FLAG.to_string());
    }
    args
}

/// Human-readable format label for the acknowledgement
fn format_label(codec: &str) -> &'static str {
    if codec == codecs::LOSSLESS {
        "ALAC"
    } else {
        "AAC"
    }
}

/// Build the concrete URLs to hand to the downloader.
///
/// Selected ids under an artist become album URLs on the same storefront;
/// under an album they become `?i=` track URLs with any existing query
/// replaced. Other kinds fall back to the original URL unchanged.
fn expand_selection(parsed: &MusicUrl, url: &str, selected_ids: Option<&[String]>) -> Vec<String> {
    let Some(ids) = selected_ids else {
        return vec![url.to_string()];
    };

    ids.iter()
        .map(|id| match parsed.kind {
            ResourceKind::Artist => format!(
                "https://music.apple.com/{}/album/{}",
                parsed.storefront_or_default(),
                id
            ),
            ResourceKind::Album => {
                let base = url.split('?').next().unwrap_or(url);
                format!("{}?i={}", base, id)
            }
            _ => url.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_selection_uses_the_whole_url() {
        let url = "https://music.apple.com/us/album/999";
        let parsed = MusicUrl::classify(url).unwrap();
        assert_eq!(expand_selection(&parsed, url, None), vec![url.to_string()]);
    }

    #[test]
    fn test_artist_selection_becomes_album_urls() {
        let url = "https://music.apple.com/us/artist/the-beatles/136975";
        let parsed = MusicUrl::classify(url).unwrap();
        let selection = ids(&["111", "222"]);

        let urls = expand_selection(&parsed, url, Some(&selection));
        assert_eq!(
            urls,
            vec![
                "https://music.apple.com/us/album/111",
                "https://music.apple.com/us/album/222",
            ]
        );
    }

    #[test]
    fn test_album_selection_replaces_existing_query() {
        let url = "https://music.apple.com/us/album/999?i=1";
        let parsed = MusicUrl::classify(url).unwrap();
        let selection = ids(&["5", "6"]);

        let urls = expand_selection(&parsed, url, Some(&selection));
        assert_eq!(
            urls,
            vec![
                "https://music.apple.com/us/album/999?i=5",
                "https://music.apple.com/us/album/999?i=6",
            ]
        );
    }

    #[test]
    fn test_other_kinds_reuse_the_original_url() {
        let url = "https://music.apple.com/us/playlist/x/pl.u-abc123";
        let parsed = MusicUrl::classify(url).unwrap();
        let selection = ids(&["1", "2"]);

        let urls = expand_selection(&parsed, url, Some(&selection));
        assert_eq!(urls, vec![url.to_string(), url.to_string()]);
    }

    #[test]
    fn test_codec_args() {
        assert_eq!(codec_args("aac-legacy"), ["--song-codec", "aac-legacy"]);
        assert_eq!(
            codec_args("alac"),
            ["--song-codec", "alac", "--use-wrapper"]
        );
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("alac"), "ALAC");
        assert_eq!(format_label("aac-legacy"), "AAC");
        assert_eq!(format_label("aac"), "AAC");
    }
}
