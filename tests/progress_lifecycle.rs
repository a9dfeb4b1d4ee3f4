//! Progress log lifecycle integration tests
//!
//! Exercises the full chain over a throwaway directory: reserve a log
//! file, let it grow the way a download child would append to it, collect
//! status, then age it out of the active window.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

use gamdl_bridge::app::progress::ProgressLogManager;
use gamdl_bridge::app::StatusAggregator;
use tempfile::TempDir;

fn append(path: &std::path::Path, content: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

#[test]
fn growing_log_reparses_from_scratch_on_every_read() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::from_secs(600),
    );

    let log_path = manager.new_log_file().unwrap();
    append(&log_path, "[Track 1/3] Downloading \"First\"\n");

    let aggregator = StatusAggregator::with_log_manager(ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::from_secs(600),
    ));

    let (tracks, errors) = aggregator.collect_progress();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "First");
    assert_eq!(tracks[0].completed, 0);
    assert!(errors.is_empty());

    // The child appends; a later poll re-derives everything from scratch
    append(
        &log_path,
        "[download]  88.0% of ~9MiB\n[Track 1/3] Downloaded \"First\"\n[Track 2/3] Downloading \"Second\"\n",
    );

    let (tracks, _) = aggregator.collect_progress();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Second");
    assert_eq!(tracks[0].current, 2);
    assert_eq!(tracks[0].completed, 1);
    assert_eq!(tracks[0].progress, "88.0%");
}

#[test]
fn logs_age_out_of_status_before_they_are_pruned() {
    let temp_dir = TempDir::new().unwrap();

    // Active window already expired, prune window not yet
    let manager = ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::ZERO,
    );

    let log_path = manager.new_log_file().unwrap();
    append(&log_path, "[Track 3/3] Downloading \"Lingering\"\n");
    std::thread::sleep(Duration::from_millis(20));

    let aggregator = StatusAggregator::with_log_manager(ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::ZERO,
    ));

    // Too old for status, young enough to stay on disk
    let (tracks, _) = aggregator.collect_progress();
    assert!(tracks.is_empty());
    manager.prune_stale();
    assert!(log_path.exists());
}

#[test]
fn reserving_a_new_log_prunes_expired_ones() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::ZERO,
        Duration::ZERO,
    );

    let old_log = manager.new_log_file().unwrap();
    append(&old_log, "finished content\n");
    std::thread::sleep(Duration::from_millis(20));

    // The next reservation sweeps the expired file
    let new_log = manager.new_log_file().unwrap();
    assert!(!old_log.exists());
    assert_ne!(old_log, new_log);
}

#[test]
fn multiple_children_report_independently() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::from_secs(600),
    );

    let first = manager.new_log_file().unwrap();
    append(&first, "[Track 1/12] Downloading \"Album One Opener\"\n");
    let second = manager.new_log_file().unwrap();
    append(
        &second,
        "\u{1b}[31mERROR\u{1b}[0m while downloading \"Album Two Track\"\n",
    );

    let aggregator = StatusAggregator::with_log_manager(ProgressLogManager::with_windows(
        temp_dir.path().to_path_buf(),
        Duration::from_secs(3600),
        Duration::from_secs(600),
    ));

    let (tracks, errors) = aggregator.collect_progress();
    assert_eq!(tracks.len(), 1);
    assert_eq!(errors, vec!["Album Two Track"]);
}
