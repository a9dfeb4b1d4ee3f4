//! Error types for gamdl Bridge
//!
//! This module defines error types for all components of the host. Every
//! error that reaches the dispatcher is rendered into one well-formed
//! `{success:false, error}` framed response; the host never surfaces an
//! unstructured fault to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Native messaging framing and request-validation errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// I/O failure on the stdio channel
    #[error("I/O error on message channel")]
    Io(#[from] std::io::Error),

    /// Stream ended inside the 4-byte length prefix
    #[error("Truncated length prefix")]
    TruncatedPrefix,

    /// Stream declared more payload bytes than it delivered
    #[error("Truncated payload: expected {expected} bytes")]
    TruncatedPayload { expected: usize },

    /// Declared length beyond the sanity cap
    #[error("Oversized message: {len} bytes (limit {limit})")]
    Oversized { len: u32, limit: u32 },

    /// Payload is not valid JSON, or fields have the wrong shape
    #[error("Malformed JSON payload")]
    Decode(#[from] serde_json::Error),

    /// Message carries no action field
    #[error("No action specified")]
    MissingAction,

    /// Action value outside the supported set
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },

    /// Action requires a URL but none was supplied
    #[error("No URL provided")]
    MissingUrl,
}

/// URL classification errors
#[derive(Error, Debug)]
pub enum UrlError {
    /// String does not match the supported Apple Music URL grammar
    #[error("Invalid Apple Music URL")]
    Invalid { url: String },
}

/// Catalog enumeration errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// URL rejected before any external call
    #[error(transparent)]
    Url(#[from] UrlError),

    /// No Python interpreter able to import the downloader library
    #[error("gamdl not found. Install with: pipx install gamdl")]
    HelperNotFound,

    /// Helper subprocess exited nonzero; carries its diagnostic
    #[error("{0}")]
    HelperFailed(String),

    /// Helper reply was not the expected JSON shape
    #[error("Invalid response from gamdl")]
    InvalidReply(#[source] Option<serde_json::Error>),

    /// Helper exceeded the wall-clock budget
    #[error("Request timed out")]
    Timeout,

    /// Helper subprocess could not be started
    #[error("Failed to run catalog helper")]
    Io(#[from] std::io::Error),
}

/// Download launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    /// URL rejected before any side effect
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Downloader executable absent from its known install locations
    #[error("gamdl not found. Install with: pipx install gamdl")]
    ExecutableNotFound,

    /// Progress log file could not be created
    #[error("Failed to create progress log: {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// OS refused to create the child process
    #[error("Failed to start download process")]
    Spawn(#[from] std::io::Error),
}

/// Status aggregation errors
#[derive(Error, Debug)]
pub enum StatusError {
    /// Process-table inspection tool could not be run
    #[error("Failed to inspect process table")]
    ProcessProbe(#[source] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly specified configuration file does not exist
    #[error("Specified config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read config file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// URL classification error
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Catalog enumeration error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Download launch error
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Status aggregation error
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Protocol(_) => "protocol",
            AppError::Url(_) => "url",
            AppError::Catalog(_) => "catalog",
            AppError::Launch(_) => "launch",
            AppError::Status(_) => "status",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Protocol result type alias
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// URL classification result type alias
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Catalog result type alias
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Launch result type alias
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;

/// Status result type alias
pub type StatusResult<T> = std::result::Result<T, StatusError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
