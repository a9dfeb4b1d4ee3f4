//! Apple Music URL classification
//!
//! The single source of truth for "is this URL actionable". Every
//! state-changing operation consults this before doing anything else. The
//! grammar is a contract shared with the extension and with the downloader's
//! own URL handling, including the two distinct playlist-identifier shapes.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{UrlError, UrlResult};

/// Public catalog URLs: `/{storefront}/{kind}[/{slug}]/{id}[?i={sub}]`
static CATALOG_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https://music\.apple\.com/(?P<storefront>[a-z]{2})/(?P<kind>artist|album|playlist|song|music-video|post)(?:/(?P<slug>[^\s/]+))?/(?P<id>[0-9]+|pl\.[0-9a-z]{32}|pl\.u-[a-zA-Z0-9]+)(?:\?i=(?P<sub>[0-9]+))?",
    )
    .expect("catalog URL pattern is valid")
});

/// Personal library URLs: `[/{storefront}]/library/{playlist|albums}/{id}`
static LIBRARY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https://music\.apple\.com(?:/(?P<storefront>[a-z]{2}))?/library/(?P<kind>playlist|albums)/(?P<id>p\.[a-zA-Z0-9]+|l\.[a-zA-Z0-9]+)",
    )
    .expect("library URL pattern is valid")
});

/// Kind of resource a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Artist,
    Album,
    Playlist,
    Song,
    MusicVideo,
    Post,
    LibraryPlaylist,
    LibraryAlbums,
}

impl ResourceKind {
    fn from_catalog(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "playlist" => Some(Self::Playlist),
            "song" => Some(Self::Song),
            "music-video" => Some(Self::MusicVideo),
            "post" => Some(Self::Post),
            _ => None,
        }
    }

    fn from_library(s: &str) -> Option<Self> {
        match s {
            "playlist" => Some(Self::LibraryPlaylist),
            "albums" => Some(Self::LibraryAlbums),
            _ => None,
        }
    }

    /// Wire name used in replies; library kinds report their plain name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Playlist => "playlist",
            Self::Song => "song",
            Self::MusicVideo => "music-video",
            Self::Post => "post",
            Self::LibraryPlaylist => "playlist",
            Self::LibraryAlbums => "albums",
        }
    }

    /// Only artists and albums have children worth enumerating; everything
    /// else downloads directly as a leaf
    pub fn is_enumerable(&self) -> bool {
        matches!(self, Self::Artist | Self::Album)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An accepted Apple Music URL, decomposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicUrl {
    /// Two-letter storefront; absent on some library URLs
    pub storefront: Option<String>,
    /// Resource kind
    pub kind: ResourceKind,
    /// Resource identifier (decimal, `pl.`, `pl.u-`, `p.`, or `l.` shape)
    pub id: String,
    /// Track selector from a `?i=` suffix
    pub sub_id: Option<String>,
}

impl MusicUrl {
    /// Classify a URL, or reject it.
    ///
    /// Matching anchors at the string start only; trailing garbage after a
    /// valid prefix is tolerated, mirroring the downloader's own acceptance.
    pub fn classify(url: &str) -> UrlResult<Self> {
        if let Some(caps) = CATALOG_URL.captures(url) {
            let kind = ResourceKind::from_catalog(&caps["kind"]);
            if let Some(kind) = kind {
                return Ok(Self {
                    storefront: Some(caps["storefront"].to_string()),
                    kind,
                    id: caps["id"].to_string(),
                    sub_id: caps.name("sub").map(|m| m.as_str().to_string()),
                });
            }
        }

        if let Some(caps) = LIBRARY_URL.captures(url) {
            let kind = ResourceKind::from_library(&caps["kind"]);
            if let Some(kind) = kind {
                return Ok(Self {
                    storefront: caps.name("storefront").map(|m| m.as_str().to_string()),
                    kind,
                    id: caps["id"].to_string(),
                    sub_id: None,
                });
            }
        }

        Err(UrlError::Invalid {
            url: url.to_string(),
        })
    }

    /// Storefront with the default used when building item URLs
    pub fn storefront_or_default(&self) -> &str {
        self.storefront.as_deref().unwrap_or("us")
    }
}
