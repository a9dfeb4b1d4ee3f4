//! gamdl API helper subprocess
//!
//! The downloader exposes its authenticated catalog API as a Python
//! library. Rather than re-implement that client, the bridge runs a
//! short-lived interpreter inside gamdl's own environment; the script
//! prints exactly one JSON object to stdout. Pagination is resolved inside
//! the script: it keeps extending the albums relationship until the API
//! reports no more data.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::app::urls::ResourceKind;
use crate::constants::downloader;

/// Locate a Python interpreter that can import gamdl.
///
/// Prefers the pipx-managed venv interpreter; falls back to the system
/// `python3` if it passes an import probe.
pub async fn find_helper_python() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        let pipx_python = home.join(downloader::PIPX_VENV_PYTHON);
        if pipx_python.is_file() {
            debug!("Using pipx venv interpreter: {}", pipx_python.display());
            return Some(pipx_python);
        }
    }

    let probe = Command::new("python3")
        .args(["-c", "import gamdl"])
        .output()
        .await;
    match probe {
        Ok(output) if output.status.success() => Some(PathBuf::from("python3")),
        _ => None,
    }
}

/// JSON string literal, usable verbatim inside the Python source
fn py_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Build the helper script for one artist or album lookup.
///
/// `cookies_path` empty means the script resolves gamdl's own
/// configuration, then falls back to `./cookies.txt` - so existing gamdl
/// setups work without any bridge configuration.
pub fn build_fetch_script(kind: ResourceKind, id: &str, cookies_path: Option<&Path>) -> String {
    let cookies = py_str(
        cookies_path
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
            .as_str(),
    );
    let kind = py_str(kind.as_str());
    let id = py_str(id);

    format!(
        r#"
import asyncio
import configparser
import json
from pathlib import Path

from gamdl.api.apple_music_api import AppleMusicApi

CONFIGURED_COOKIES = {cookies}


def get_cookies_path():
    if CONFIGURED_COOKIES:
        return CONFIGURED_COOKIES
    config_path = Path.home() / ".gamdl" / "config.ini"
    if config_path.exists():
        config = configparser.ConfigParser()
        config.read(config_path)
        if "gamdl" in config and "cookies_path" in config["gamdl"]:
            return config["gamdl"]["cookies_path"]
    return "./cookies.txt"


async def fetch():
    try:
        api = await AppleMusicApi.create_from_netscape_cookies(cookies_path=get_cookies_path())

        url_type = {kind}
        url_id = {id}

        if url_type == "artist":
            response = await api.get_artist(url_id)
            if not response:
                print(json.dumps({{"success": False, "error": "Artist not found"}}))
                return

            artist = response["data"][0]
            artist_name = artist["attributes"]["name"]

            albums_rel = artist.get("relationships", {{}}).get("albums", {{}})
            albums_data = list(albums_rel.get("data", []))
            if albums_rel:
                async for extended in api.extend_api_data(albums_rel):
                    albums_data.append(extended)

            items = []
            for album in albums_data:
                if album.get("attributes"):
                    attrs = album["attributes"]
                    items.append({{
                        "id": album["id"],
                        "name": attrs.get("name", "Unknown"),
                        "artistName": attrs.get("artistName", artist_name),
                        "trackCount": attrs.get("trackCount", 0),
                        "releaseDate": attrs.get("releaseDate", ""),
                        "contentRating": attrs.get("contentRating", ""),
                        "type": "album",
                    }})

            print(json.dumps({{
                "success": True,
                "type": "artist",
                "artistName": artist_name,
                "items": items,
            }}))

        elif url_type == "album":
            response = await api.get_album(url_id)
            if not response:
                print(json.dumps({{"success": False, "error": "Album not found"}}))
                return

            album = response["data"][0]
            album_name = album["attributes"]["name"]
            tracks_data = album.get("relationships", {{}}).get("tracks", {{}}).get("data", [])

            items = []
            for track in tracks_data:
                if track.get("attributes"):
                    attrs = track["attributes"]
                    items.append({{
                        "id": track["id"],
                        "name": attrs.get("name", "Unknown"),
                        "trackNumber": attrs.get("trackNumber", 0),
                        "discNumber": attrs.get("discNumber", 1),
                        "durationInMillis": attrs.get("durationInMillis", 0),
                        "type": "song",
                    }})

            print(json.dumps({{
                "success": True,
                "type": "album",
                "albumName": album_name,
                "items": items,
            }}))

    except Exception as e:
        print(json.dumps({{"success": False, "error": str(e)}}))


asyncio.run(fetch())
"#
    )
}
