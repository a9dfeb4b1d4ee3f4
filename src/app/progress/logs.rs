//! Progress log directory lifecycle
//!
//! Naming: `download_<epoch-millis>.log`, unique and recency-ordered. Two
//! distinct ages govern a file's life: after the active window it stops
//! contributing to status responses, after the prune window it is deleted.
//! The windows differ on purpose - the long one bounds disk usage, the
//! short one bounds how long a finished download can pollute status.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tracing::debug;

use crate::constants::logs;

/// Owns the on-disk directory of progress logs
#[derive(Debug)]
pub struct ProgressLogManager {
    dir: PathBuf,
    prune_after: Duration,
    active_window: Duration,
}

impl ProgressLogManager {
    /// Manager over `dir` with the production staleness windows
    pub fn new(dir: PathBuf) -> Self {
        Self::with_windows(dir, logs::PRUNE_AFTER, logs::ACTIVE_WINDOW)
    }

    /// Manager with explicit windows; tests inject throwaway values
    pub fn with_windows(dir: PathBuf, prune_after: Duration, active_window: Duration) -> Self {
        Self {
            dir,
            prune_after,
            active_window,
        }
    }

    /// The directory this manager owns
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reserve a fresh log file path for one download child.
    ///
    /// Creates the directory if absent and opportunistically prunes stale
    /// logs first. The file itself is created by the caller when wiring up
    /// the child's output. The millisecond stamp is bumped past any
    /// existing file, so rapid consecutive launches stay unique.
    pub fn new_log_file(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        self.prune_stale();

        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let path = self.dir.join(format!(
                "{}{}{}",
                logs::FILE_PREFIX,
                stamp,
                logs::FILE_SUFFIX
            ));
            if !path.exists() {
                return Ok(path);
            }
            stamp += 1;
        }
    }

    /// Delete logs older than the prune window.
    ///
    /// Best-effort: permission problems and races with concurrent
    /// invocations are swallowed, so pruning can never fail a launch or a
    /// status check.
    pub fn prune_stale(&self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping log pruning: {}", e);
                return;
            }
        };

        for path in entries.flatten().map(|e| e.path()) {
            if !is_log_file(&path) {
                continue;
            }
            if matches!(file_age(&path), Some(age) if age > self.prune_after) {
                if let Err(e) = fs::remove_file(&path) {
                    debug!("Failed to prune {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Log files still young enough to describe a live or recent download.
    ///
    /// Enumeration order is whatever the OS yields; it is not guaranteed
    /// deterministic across platforms and callers must not rely on it.
    pub fn active_logs(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| is_log_file(p))
            .filter(|p| matches!(file_age(p), Some(age) if age <= self.active_window))
            .collect()
    }
}

fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(logs::FILE_PREFIX) && n.ends_with(logs::FILE_SUFFIX))
        .unwrap_or(false)
}

/// Age by modification time; `None` when the file vanished mid-scan or the
/// clock reads before the mtime
fn file_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    SystemTime::now().duration_since(modified).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_log_file_creates_directory_and_names_by_stamp() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("progress");
        let manager = ProgressLogManager::new(dir.clone());

        let path = manager.new_log_file().unwrap();
        assert!(dir.is_dir());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(logs::FILE_PREFIX));
        assert!(name.ends_with(logs::FILE_SUFFIX));
    }

    #[test]
    fn test_rapid_reservations_stay_unique() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ProgressLogManager::new(temp_dir.path().to_path_buf());

        let first = manager.new_log_file().unwrap();
        fs::write(&first, b"").unwrap();
        let second = manager.new_log_file().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fresh_file_is_active_and_not_pruned() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ProgressLogManager::new(temp_dir.path().to_path_buf());

        let path = manager.new_log_file().unwrap();
        fs::write(&path, b"content").unwrap();

        manager.prune_stale();
        assert!(path.exists());
        assert_eq!(manager.active_logs(), vec![path]);
    }

    #[test]
    fn test_file_past_prune_window_is_deleted() {
        let temp_dir = TempDir::new().unwrap();
        // Zero windows: any file age exceeds them immediately
        let manager = ProgressLogManager::with_windows(
            temp_dir.path().to_path_buf(),
            Duration::ZERO,
            Duration::ZERO,
        );

        let path = manager.new_log_file().unwrap();
        fs::write(&path, b"content").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert!(manager.active_logs().is_empty());
        manager.prune_stale();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_past_active_window_is_excluded_but_retained() {
        let temp_dir = TempDir::new().unwrap();
        // Generous prune window, zero active window: excluded, not deleted
        let manager = ProgressLogManager::with_windows(
            temp_dir.path().to_path_buf(),
            Duration::from_secs(3600),
            Duration::ZERO,
        );

        let path = manager.new_log_file().unwrap();
        fs::write(&path, b"content").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert!(manager.active_logs().is_empty());
        manager.prune_stale();
        assert!(path.exists());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ProgressLogManager::with_windows(
            temp_dir.path().to_path_buf(),
            Duration::ZERO,
            Duration::from_secs(3600),
        );

        let other = temp_dir.path().join("notes.txt");
        fs::write(&other, b"keep me").unwrap();

        manager.prune_stale();
        assert!(other.exists());
        assert!(manager.active_logs().is_empty());
    }

    #[test]
    fn test_missing_directory_is_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ProgressLogManager::new(temp_dir.path().join("never-created"));

        manager.prune_stale();
        assert!(manager.active_logs().is_empty());
    }
}
