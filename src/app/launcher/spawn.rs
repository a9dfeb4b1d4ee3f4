//! Detached process spawning
//!
//! A download child must outlive the host: it gets its own process group,
//! no stdin, and both output streams appended to one progress log. The
//! spawn returns as soon as the OS confirms process creation; the child is
//! never awaited.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{LaunchError, LaunchResult};

/// Spawn one detached downloader process, its combined output wired to
/// `log_path`. Returns the child pid.
pub fn spawn_detached(
    executable: &Path,
    args: &[String],
    log_path: &Path,
    working_dir: &Path,
    path_env: &str,
) -> LaunchResult<u32> {
    let log_out = File::create(log_path).map_err(|source| LaunchError::LogFile {
        path: log_path.to_path_buf(),
        source,
    })?;
    let log_err = log_out.try_clone().map_err(|source| LaunchError::LogFile {
        path: log_path.to_path_buf(),
        source,
    })?;

    let mut command = Command::new(executable);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log_out))
        .stderr(Stdio::from(log_err))
        .current_dir(working_dir)
        .env("PATH", path_env);

    // Own process group so the child survives the host exiting
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command.spawn()?;
    let pid = child.id();
    debug!("Spawned download process {} -> {}", pid, log_path.display());
    // Deliberately not waited: completion is inferred later from the log
    Ok(pid)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_spawn_wires_output_to_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("download_1.log");

        spawn_detached(
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo spawned-marker".to_string()],
            &log_path,
            temp_dir.path(),
            "/usr/bin:/bin",
        )
        .unwrap();

        // The child is detached; poll briefly for its output to land
        let mut content = String::new();
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            content = std::fs::read_to_string(&log_path).unwrap_or_default();
            if content.contains("spawned-marker") {
                break;
            }
        }
        assert!(content.contains("spawned-marker"));
    }

    #[test]
    fn test_missing_executable_fails_without_log_content() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("download_2.log");

        let result = spawn_detached(
            Path::new("/nonexistent/tool"),
            &[],
            &log_path,
            temp_dir.path(),
            "/usr/bin:/bin",
        );
        assert!(result.is_err());
    }
}
