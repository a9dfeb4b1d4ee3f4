//! Progress reconstruction from raw log text
//!
//! The downloader exposes no structured progress API; these patterns are a
//! versioned contract with its human-readable output format. Parsing is
//! pure and idempotent: everything derives from the full content on every
//! call, never from history across calls, so a re-read of a grown log
//! re-derives from scratch. Only fully matched patterns are trusted, which
//! makes a partial line at the tail of a growing file harmless.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// ANSI color/style sequences: ESC `[` ... `m`
static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI pattern is valid"));

/// `[Track 3/12] Downloading "Name"`
static TRACK_DOWNLOADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Track (\d+)/(\d+)\] Downloading "([^"]+)""#).expect("track pattern is valid")
});

/// `[download]  42.3% of ~12.34MiB ...`
static DOWNLOAD_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[download\]\s+(\d+(?:\.\d+)?%)").expect("percent pattern is valid"));

/// `[Track 3/12] Downloaded "Name"`
static TRACK_DOWNLOADED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Track \d+/\d+\] Downloaded "[^"]+""#).expect("completion pattern is valid")
});

/// `ERROR ... downloading "Name"` in any case
static TRACK_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)ERROR.*?downloading "([^"]+)""#).expect("error pattern is valid")
});

/// Terminal summary line emitted once a run completes
const FINISHED_MARKER: &str = "Finished with";

/// Percent reported before the first progress line appears
const NO_PROGRESS: &str = "0%";

/// Progress of the most recent track seen in one log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackProgress {
    pub name: String,
    pub current: u32,
    pub total: u32,
    /// Raw percent token, e.g. `"42.3%"`
    pub progress: String,
    /// Tracks already completed in this run
    pub completed: usize,
    pub finished: bool,
}

/// Everything extracted from one log's content
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    /// Current track, absent until the first track marker appears
    pub track: Option<TrackProgress>,
    /// Names of items that failed, in order of appearance
    pub errors: Vec<String>,
}

/// Remove terminal styling so the patterns match the visible text
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Extract structured progress from raw log content.
///
/// Only the last downloading/percent matches count: the log only grows, so
/// the last occurrence is the current state. Errors are collected even
/// when no track marker has appeared yet.
pub fn parse(content: &str) -> ParsedLog {
    let content = strip_ansi(content);

    let errors: Vec<String> = TRACK_ERROR
        .captures_iter(&content)
        .map(|c| c[1].to_string())
        .collect();

    let Some(last) = TRACK_DOWNLOADING.captures_iter(&content).last() else {
        return ParsedLog {
            track: None,
            errors,
        };
    };

    let progress = DOWNLOAD_PERCENT
        .captures_iter(&content)
        .last()
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| NO_PROGRESS.to_string());

    let track = TrackProgress {
        name: last[3].to_string(),
        current: last[1].parse().unwrap_or(0),
        total: last[2].parse().unwrap_or(0),
        progress,
        completed: TRACK_DOWNLOADED.find_iter(&content).count(),
        finished: content.contains(FINISHED_MARKER),
    };

    ParsedLog {
        track: Some(track),
        errors,
    }
}
