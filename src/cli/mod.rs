//! Command-line interface components
//!
//! This module contains the argument surface of the host binary. There are
//! no subcommands: the browser launches the host and speaks the framed
//! protocol on stdio.

pub mod args;

pub use args::{Cli, GlobalArgs};
