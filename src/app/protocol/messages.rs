//! Typed request and response messages
//!
//! Inbound payloads are dynamic string-keyed JSON. They are validated here,
//! at the protocol boundary, into a closed set of request variants; unknown
//! actions are rejected explicitly. Every outbound shape carries `success`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::catalog::{AlbumItem, Listing, TrackItem};
use crate::app::status::DownloadStatus;
use crate::errors::{ProtocolError, ProtocolResult};

/// One decoded inbound request
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Launch one or more detached downloads
    Download {
        url: String,
        selected_ids: Option<Vec<String>>,
        codec: Option<String>,
    },
    /// Enumerate child items of an artist or album URL
    FetchItems { url: String },
    /// Report live process and per-track progress state
    CheckStatus,
}

/// Loose inbound envelope, decoded before validation
#[derive(Debug, Deserialize)]
struct Envelope {
    action: Option<String>,
    url: Option<String>,
    #[serde(rename = "selectedIds")]
    selected_ids: Option<Vec<String>>,
    codec: Option<String>,
}

impl Request {
    /// Validate a decoded JSON payload into a request variant
    pub fn from_value(value: Value) -> ProtocolResult<Self> {
        let envelope: Envelope = serde_json::from_value(value)?;
        let action = envelope.action.ok_or(ProtocolError::MissingAction)?;
        match action.as_str() {
            "download" => {
                let url = envelope.url.ok_or(ProtocolError::MissingUrl)?;
                Ok(Request::Download {
                    url,
                    selected_ids: envelope.selected_ids,
                    codec: envelope.codec,
                })
            }
            "fetch_items" => {
                let url = envelope.url.ok_or(ProtocolError::MissingUrl)?;
                Ok(Request::FetchItems { url })
            }
            "check_status" => Ok(Request::CheckStatus),
            _ => Err(ProtocolError::UnknownAction { action }),
        }
    }
}

/// One outbound response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Error(ErrorReply),
    Launch(LaunchReply),
    Listing(ListingReply),
    Status(DownloadStatus),
}

impl Response {
    /// Failure response with a diagnostic for the caller
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(ErrorReply::new(message))
    }
}

/// Failure reply: `{success:false, error}`
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub success: bool,
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Download launch acknowledgement
#[derive(Debug, Serialize)]
pub struct LaunchReply {
    pub success: bool,
    pub message: String,
}

/// `fetch_items` reply shapes
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListingReply {
    /// Albums under an artist
    Artist {
        success: bool,
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(rename = "artistName")]
        artist_name: String,
        items: Vec<AlbumItem>,
    },
    /// Tracks under an album
    Album {
        success: bool,
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(rename = "albumName")]
        album_name: String,
        items: Vec<TrackItem>,
    },
    /// Leaf resources download directly; nothing to enumerate
    Direct {
        success: bool,
        #[serde(rename = "type")]
        kind: String,
        items: Vec<Value>,
        message: String,
    },
}

impl From<Listing> for ListingReply {
    fn from(listing: Listing) -> Self {
        match listing {
            Listing::Artist { artist_name, items } => ListingReply::Artist {
                success: true,
                kind: "artist",
                artist_name,
                items,
            },
            Listing::Album { album_name, items } => ListingReply::Album {
                success: true,
                kind: "album",
                album_name,
                items,
            },
            Listing::Direct { kind } => ListingReply::Direct {
                success: true,
                kind: kind.as_str().to_string(),
                items: Vec::new(),
                message: "Direct download available".to_string(),
            },
        }
    }
}
