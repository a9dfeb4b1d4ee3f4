//! gamdl Bridge Library
//!
//! A native messaging host bridging a browser extension to the gamdl
//! command-line downloader: length-prefixed JSON framing on stdio, request
//! dispatch for download/fetch/status actions, detached download process
//! launches, and progress reconstruction from the children's captured
//! output.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
