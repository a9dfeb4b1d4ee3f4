//! Catalog enumeration
//!
//! Lists the children of an artist (albums) or an album (tracks) through
//! the downloader's own read API, reached via a short-lived helper
//! subprocess, and marks albums that already exist in the output directory.
//! Leaf resources (playlists, songs, videos) are not enumerated; they
//! download directly.

pub mod fetcher;
pub mod helper;
pub mod models;
pub mod probe;

pub use fetcher::CatalogFetcher;
pub use models::{AlbumItem, Listing, TrackItem};
