//! Catalog item models and ordering
//!
//! Items deserialize straight from the helper reply and serialize straight
//! into `fetch_items` responses, so field names follow the wire. The
//! `downloaded` flag is computed on every fetch, never stored.

use serde::{Deserialize, Serialize};

use crate::app::urls::ResourceKind;

/// One album listed under an artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumItem {
    pub id: String,
    pub name: String,
    /// May differ from the page artist on compilations
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(rename = "trackCount", default)]
    pub track_count: u32,
    /// `YYYY-MM-DD`; empty when the API omits it
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    #[serde(rename = "contentRating", default)]
    pub content_rating: String,
    #[serde(rename = "type", default = "album_kind")]
    pub kind: String,
    #[serde(default)]
    pub downloaded: bool,
}

fn album_kind() -> String {
    "album".to_string()
}

/// One track listed under an album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "trackNumber", default)]
    pub track_number: u32,
    #[serde(rename = "discNumber", default = "default_disc")]
    pub disc_number: u32,
    #[serde(rename = "durationInMillis", default)]
    pub duration_ms: u64,
    #[serde(rename = "type", default = "song_kind")]
    pub kind: String,
    /// Tracks are not independently checkable on disk
    #[serde(default)]
    pub downloaded: bool,
}

fn song_kind() -> String {
    "song".to_string()
}

fn default_disc() -> u32 {
    1
}

/// Assembled result of one fetch
#[derive(Debug)]
pub enum Listing {
    /// Albums under an artist, newest first
    Artist {
        artist_name: String,
        items: Vec<AlbumItem>,
    },
    /// Tracks under an album in (disc, track) order
    Album {
        album_name: String,
        items: Vec<TrackItem>,
    },
    /// Leaf resource; downloads directly without enumeration
    Direct { kind: ResourceKind },
}

/// Order albums newest first.
///
/// Descending lexicographic on the date string, which puts empty (unknown)
/// release dates after every populated one.
pub fn sort_albums_newest_first(items: &mut [AlbumItem]) {
    items.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}

/// Order tracks by (disc, track) ascending
pub fn sort_tracks_by_position(items: &mut [TrackItem]) {
    items.sort_by_key(|t| (t.disc_number, t.track_number));
}
