//! Configuration management for gamdl Bridge
//!
//! This module provides unified configuration management with zero-config
//! defaults and multi-source loading: defaults, then a config file if one
//! exists, then CLI overrides applied by the caller. Every path the core
//! needs (output directory, cookies, progress log directory, project root)
//! resolves here, so no component reads ambient environment at call sites.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{logging, logs, output};
use crate::errors::{ConfigError, ConfigResult};

/// Host configuration, TOML-backed
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Where the downloader writes finished albums; probed to mark catalog
    /// items as already downloaded. Default: `<project_root>/Apple Music`.
    pub output_path: Option<PathBuf>,

    /// Netscape cookies file handed to the catalog helper. When unset the
    /// helper resolves the downloader's own configuration.
    pub cookies_path: Option<PathBuf>,

    /// Directory owning the per-download progress logs.
    /// Default: `<temp_dir>/gamdl_progress`.
    pub progress_dir: Option<PathBuf>,

    /// Working directory for spawned download processes.
    /// Default: the user's home directory.
    pub project_root: Option<PathBuf>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level for the host
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if one exists)
    ///
    /// An explicitly specified file that does not exist is an error; a
    /// missing default-location file is not.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Find a configuration file in the standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from("./gamdl-bridge.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("gamdl-bridge").join("config.toml"));
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: BridgeConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Working directory for spawned download processes
    pub fn resolved_project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory the downloader writes finished albums into
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.resolved_project_root().join(output::DEFAULT_DIR_NAME))
    }

    /// Directory owning the per-download progress logs
    pub fn resolved_progress_dir(&self) -> PathBuf {
        self.progress_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(logs::DIR_NAME))
    }

    /// Cookies file for the catalog helper, if configured
    pub fn resolved_cookies_path(&self) -> Option<PathBuf> {
        self.cookies_path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults_are_usable() {
        let config = BridgeConfig::default();

        assert!(config
            .resolved_progress_dir()
            .ends_with(logs::DIR_NAME));
        assert!(config
            .resolved_output_path()
            .ends_with(output::DEFAULT_DIR_NAME));
        assert!(config.resolved_cookies_path().is_none());
        assert_eq!(config.logging.level, logging::DEFAULT_LOG_LEVEL);
    }

    #[tokio::test]
    async fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = BridgeConfig::load(Some(config_path)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let test_config = r#"
output_path = "/music/library"
progress_dir = "/tmp/bridge-logs"

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = BridgeConfig::load(Some(config_path)).await.unwrap();

        assert_eq!(config.resolved_output_path(), PathBuf::from("/music/library"));
        assert_eq!(
            config.resolved_progress_dir(),
            PathBuf::from("/tmp/bridge-logs")
        );
        assert_eq!(config.logging.level, "debug");
        // Unspecified values keep their defaults
        assert!(config.cookies_path.is_none());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "output_path = [not toml")
            .await
            .unwrap();

        let result = BridgeConfig::load(Some(config_path)).await;
        assert!(result.is_err());
    }
}
