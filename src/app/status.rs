//! Download status aggregation
//!
//! Liveness comes from the process table, progress from the logs, and the
//! two are independent signals: a child that just started has no log
//! content yet, and a finished child's log lingers until it ages out, so
//! `isDownloading=true` with zero tracks and the converse are both valid,
//! non-contradictory snapshots.

use serde::Serialize;
use tokio::process::Command;
use tracing::debug;

use crate::app::progress::{parse, ProgressLogManager, TrackProgress};
use crate::config::BridgeConfig;
use crate::constants::downloader;
use crate::errors::{StatusError, StatusResult};

/// One status snapshot for the caller
#[derive(Debug, Serialize)]
pub struct DownloadStatus {
    pub success: bool,
    #[serde(rename = "isDownloading")]
    pub is_downloading: bool,
    #[serde(rename = "processCount")]
    pub process_count: usize,
    pub tracks: Vec<TrackProgress>,
    pub errors: Vec<String>,
}

/// Combines process liveness with log-derived progress
pub struct StatusAggregator {
    logs: ProgressLogManager,
}

impl StatusAggregator {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            logs: ProgressLogManager::new(config.resolved_progress_dir()),
        }
    }

    /// Aggregator over an explicit log manager
    pub fn with_log_manager(logs: ProgressLogManager) -> Self {
        Self { logs }
    }

    /// Take one status snapshot
    pub async fn snapshot(&self) -> StatusResult<DownloadStatus> {
        let (is_downloading, process_count) = self.count_live_processes().await?;
        let (tracks, errors) = self.collect_progress();

        Ok(DownloadStatus {
            success: true,
            is_downloading,
            process_count,
            tracks,
            errors,
        })
    }

    /// Count live downloader processes by command-line pattern.
    ///
    /// Independent of log content by design; callers must treat liveness
    /// and parsed tracks as separate signals.
    async fn count_live_processes(&self) -> StatusResult<(bool, usize)> {
        let output = Command::new("pgrep")
            .args(["-f", downloader::PROCESS_PATTERN])
            .output()
            .await
            .map_err(StatusError::ProcessProbe)?;

        // pgrep exits nonzero when nothing matches
        if !output.status.success() {
            return Ok((false, 0));
        }

        let count = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count();
        Ok((count > 0, count))
    }

    /// Run the parser over every active log.
    ///
    /// Unreadable or undecodable files are skipped; results concatenate in
    /// file-system enumeration order, which is not deterministic across
    /// platforms.
    pub fn collect_progress(&self) -> (Vec<TrackProgress>, Vec<String>) {
        let mut tracks = Vec::new();
        let mut errors = Vec::new();

        for path in self.logs.active_logs() {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Skipping unreadable log {}: {}", path.display(), e);
                    continue;
                }
            };

            let parsed = parse(&content);
            if let Some(track) = parsed.track {
                tracks.push(track);
            }
            errors.extend(parsed.errors);
        }

        (tracks, errors)
    }
}
