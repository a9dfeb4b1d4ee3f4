//! Catalog fetching through the downloader's API helper
//!
//! Runs one helper subprocess per fetch under a hard wall-clock timeout,
//! deserializes its JSON reply, sorts the items, and annotates albums with
//! their local download state.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::app::urls::MusicUrl;
use crate::config::BridgeConfig;
use crate::constants::downloader;
use crate::errors::{CatalogError, CatalogResult};

use super::helper::{build_fetch_script, find_helper_python};
use super::models::{
    sort_albums_newest_first, sort_tracks_by_position, AlbumItem, Listing, TrackItem,
};
use super::probe::album_downloaded;

/// Raw reply printed by the helper script
#[derive(Debug, Deserialize)]
struct HelperReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "artistName", default)]
    artist_name: Option<String>,
    #[serde(rename = "albumName", default)]
    album_name: Option<String>,
    #[serde(default)]
    items: Option<Value>,
}

/// Enumerates child items of artist and album URLs
pub struct CatalogFetcher {
    cookies_path: Option<PathBuf>,
    output_path: PathBuf,
}

impl CatalogFetcher {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            cookies_path: config.resolved_cookies_path(),
            output_path: config.resolved_output_path(),
        }
    }

    /// Fetch the item listing for a URL.
    ///
    /// Non-enumerable kinds succeed immediately with an empty listing.
    pub async fn fetch_items(&self, url: &str) -> CatalogResult<Listing> {
        let parsed = MusicUrl::classify(url)?;

        if !parsed.kind.is_enumerable() {
            debug!("{} downloads directly, nothing to enumerate", parsed.kind);
            return Ok(Listing::Direct { kind: parsed.kind });
        }

        let python = find_helper_python()
            .await
            .ok_or(CatalogError::HelperNotFound)?;
        let script = build_fetch_script(parsed.kind, &parsed.id, self.cookies_path.as_deref());

        let reply = self.run_helper(&python, &script).await?;
        self.assemble_listing(reply)
    }

    /// Run the helper under the fetch timeout and decode its reply
    async fn run_helper(&self, python: &Path, script: &str) -> CatalogResult<HelperReply> {
        let output = timeout(
            downloader::FETCH_TIMEOUT,
            Command::new(python)
                .arg("-c")
                .arg(script)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| CatalogError::Timeout)??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let diagnostic = if stderr.is_empty() {
                "Unknown error".to_string()
            } else {
                stderr
            };
            warn!("Catalog helper exited nonzero: {}", diagnostic);
            return Err(CatalogError::HelperFailed(diagnostic));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reply: HelperReply = serde_json::from_str(stdout.trim())
            .map_err(|e| CatalogError::InvalidReply(Some(e)))?;

        if !reply.success {
            return Err(CatalogError::HelperFailed(
                reply.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        Ok(reply)
    }

    /// Sort items and annotate albums with their local download state
    fn assemble_listing(&self, reply: HelperReply) -> CatalogResult<Listing> {
        let items = reply.items.unwrap_or_else(|| Value::Array(Vec::new()));

        match reply.kind.as_deref() {
            Some("artist") => {
                let artist_name = reply.artist_name.unwrap_or_default();
                let mut items: Vec<AlbumItem> = serde_json::from_value(items)
                    .map_err(|e| CatalogError::InvalidReply(Some(e)))?;
                sort_albums_newest_first(&mut items);
                for item in &mut items {
                    let artist = if item.artist_name.is_empty() {
                        artist_name.as_str()
                    } else {
                        item.artist_name.as_str()
                    };
                    item.downloaded = album_downloaded(&self.output_path, artist, &item.name);
                }
                Ok(Listing::Artist { artist_name, items })
            }
            Some("album") => {
                let album_name = reply.album_name.unwrap_or_default();
                let mut items: Vec<TrackItem> = serde_json::from_value(items)
                    .map_err(|e| CatalogError::InvalidReply(Some(e)))?;
                sort_tracks_by_position(&mut items);
                Ok(Listing::Album { album_name, items })
            }
            _ => Err(CatalogError::InvalidReply(None)),
        }
    }
}
