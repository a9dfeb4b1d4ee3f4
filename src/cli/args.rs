//! Command-line argument parsing for gamdl Bridge
//!
//! This module defines the CLI structure using clap derive macros. The
//! binary is normally launched by the browser, which appends the extension
//! origin and, on some platforms, a `--parent-window=<handle>` argument;
//! those trailing arguments are collected verbatim and ignored.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::constants::logging;

/// gamdl Bridge - native messaging host for the gamdl downloader
#[derive(Parser, Debug)]
#[command(
    name = "gamdl-bridge",
    version,
    about = "Bridge a browser extension to the gamdl Apple Music downloader",
    long_about = "A native messaging host speaking Chrome's length-prefixed JSON protocol on stdio.
Launches detached gamdl download processes and reconstructs their progress from captured output."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Arguments appended by the browser (extension origin, window handle)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub caller_args: Vec<String>,
}

/// Global arguments
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Progress log directory override
    #[arg(long, value_name = "DIR")]
    pub progress_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Map verbosity flags to a tracing level string
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else if self.global.quiet {
            "error"
        } else {
            logging::DEFAULT_LOG_LEVEL
        }
    }
}
