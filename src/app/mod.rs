//! Core host logic for gamdl Bridge
//!
//! This module contains the host components: the framed stdio protocol,
//! URL classification, catalog enumeration, detached download launching,
//! progress log lifecycle and scraping, and the request dispatcher.
//!
//! Control flow for one invocation:
//!
//! ```text
//! framing::read_message
//!     -> Dispatcher
//!         -> CatalogFetcher | DownloadLauncher | StatusAggregator
//!     -> framing::write_message
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use gamdl_bridge::app::Dispatcher;
//! use gamdl_bridge::config::BridgeConfig;
//!
//! # async fn example() -> gamdl_bridge::Result<()> {
//! let dispatcher = Dispatcher::new(BridgeConfig::default());
//!
//! let mut stdin = tokio::io::stdin();
//! let mut stdout = tokio::io::stdout();
//! dispatcher.run_once(&mut stdin, &mut stdout).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod dispatch;
pub mod launcher;
pub mod progress;
pub mod protocol;
pub mod status;
pub mod urls;

// Re-export main public API
pub use catalog::CatalogFetcher;
pub use dispatch::Dispatcher;
pub use launcher::DownloadLauncher;
pub use progress::{ProgressLogManager, TrackProgress};
pub use protocol::{read_message, write_message, Request, Response};
pub use status::{DownloadStatus, StatusAggregator};
pub use urls::{MusicUrl, ResourceKind};
