//! Application constants for gamdl Bridge
//!
//! This module centralizes all constants used throughout the host,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Native messaging protocol limits
pub mod protocol {
    /// Sanity cap on one framed message (1 MiB)
    ///
    /// Requests from the extension are tiny; a length prefix beyond this is
    /// a corrupt frame, not an allocation request.
    pub const MAX_MESSAGE_BYTES: u32 = 1024 * 1024;
}

/// External downloader discovery and invocation
pub mod downloader {
    use super::Duration;

    /// Name of the external downloader executable
    pub const TOOL_NAME: &str = "gamdl";

    /// Install guidance surfaced when the executable cannot be found
    pub const INSTALL_HINT: &str = "pipx install gamdl";

    /// Executable location under the user's home directory (pipx default),
    /// checked before the system locations
    pub const HOME_INSTALL_LOCATION: &str = ".local/bin/gamdl";

    /// Fixed system install locations probed for the executable, in order.
    /// `$PATH` is deliberately not consulted; browsers launch native hosts
    /// with a minimal environment.
    pub const INSTALL_LOCATIONS: &[&str] = &["/usr/local/bin/gamdl", "/opt/homebrew/bin/gamdl"];

    /// Python interpreter of the pipx-managed gamdl venv, relative to home
    pub const PIPX_VENV_PYTHON: &str = ".local/pipx/venvs/gamdl/bin/python";

    /// Process-table pattern identifying live download children
    pub const PROCESS_PATTERN: &str = "gamdl.*music.apple.com";

    /// Wall-clock budget for one catalog helper invocation
    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

    /// Directories prepended to `PATH` for spawned children so companion
    /// tools (ffmpeg, the decryption wrapper) resolve
    pub const EXTRA_PATH_DIRS: &[&str] =
        &["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin", "/bin"];

    /// Home-relative directories appended to the child search path
    pub const EXTRA_HOME_PATH_DIRS: &[&str] = &[".local/bin", "wrapper"];
}

/// Codec selection
pub mod codecs {
    /// Codec used when the request does not specify one
    pub const DEFAULT: &str = "aac-legacy";

    /// Lossless codec, the one codec that requires wrapper mode
    pub const LOSSLESS: &str = "alac";

    /// Flag selecting the song codec
    pub const SONG_CODEC_FLAG: &str = "--song-codec";

    /// Flag enabling wrapper mode for lossless downloads
    pub const WRAPPER_FLAG: &str = "--use-wrapper";
}

/// Progress log lifecycle
pub mod logs {
    use super::Duration;

    /// Directory name for progress logs under the system temp directory
    pub const DIR_NAME: &str = "gamdl_progress";

    /// Log file name prefix
    pub const FILE_PREFIX: &str = "download_";

    /// Log file name suffix
    pub const FILE_SUFFIX: &str = ".log";

    /// Age after which a log file is deleted (bounds disk usage)
    pub const PRUNE_AFTER: Duration = Duration::from_secs(3600);

    /// Age after which a log file no longer contributes to status responses
    /// (bounds how long a finished download lingers in them)
    pub const ACTIVE_WINDOW: Duration = Duration::from_secs(600);
}

/// Download output probing
pub mod output {
    /// Directory name for downloads under the project root
    pub const DEFAULT_DIR_NAME: &str = "Apple Music";

    /// Audio extensions that count as a downloaded track
    pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "mp3", "flac", "aac"];
}

/// Logging defaults
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use codecs::DEFAULT as DEFAULT_CODEC;
pub use downloader::{FETCH_TIMEOUT, INSTALL_HINT, TOOL_NAME};
pub use logs::{ACTIVE_WINDOW, PRUNE_AFTER};
