//! Progress log lifecycle and scraping
//!
//! Each launched download owns one append-only log file capturing the
//! child's combined output; that text is the only observable state the
//! downloader exposes. `logs` owns the on-disk directory lifecycle;
//! `parser` reconstructs structured progress from the raw content.

pub mod logs;
pub mod parser;

pub use logs::ProgressLogManager;
pub use parser::{parse, strip_ansi, ParsedLog, TrackProgress};
