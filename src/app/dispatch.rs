//! Request dispatch
//!
//! One invocation handles exactly one message: read, route, answer. Every
//! failure path still produces one well-formed framed response; only a
//! clean close of the input stream exits without output. A corrupt frame
//! is answered and nothing else happens - in particular no download or
//! fetch is started.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::constants::codecs;
use crate::errors::Result;

use super::catalog::CatalogFetcher;
use super::launcher::DownloadLauncher;
use super::protocol::messages::{LaunchReply, ListingReply, Request, Response};
use super::protocol::{read_message, write_message};
use super::status::StatusAggregator;

/// Top-level request router
pub struct Dispatcher {
    config: BridgeConfig,
}

impl Dispatcher {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Read one framed message, dispatch it, write one framed response.
    ///
    /// Returns without output on clean stream closure.
    pub async fn run_once<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let value: Option<Value> = match read_message(reader).await {
            Ok(value) => value,
            Err(e) => {
                debug!("Failed to read inbound message: {}", e);
                write_message(writer, &Response::error("No message received")).await?;
                return Ok(());
            }
        };

        let Some(value) = value else {
            debug!("Input stream closed, exiting");
            return Ok(());
        };

        let response = match Request::from_value(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Response::error(e.to_string()),
        };

        write_message(writer, &response).await?;
        Ok(())
    }

    /// Route one validated request to its handler
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::Download {
                url,
                selected_ids,
                codec,
            } => self.handle_download(&url, selected_ids.as_deref(), codec.as_deref()),
            Request::FetchItems { url } => self.handle_fetch_items(&url).await,
            Request::CheckStatus => self.handle_check_status().await,
        }
    }

    fn handle_download(
        &self,
        url: &str,
        selected_ids: Option<&[String]>,
        codec: Option<&str>,
    ) -> Response {
        let codec = codec.unwrap_or(codecs::DEFAULT);
        let launcher = DownloadLauncher::new(&self.config);
        match launcher.launch(url, selected_ids, codec) {
            Ok(receipt) => Response::Launch(LaunchReply {
                success: true,
                message: receipt.message,
            }),
            Err(e) => {
                warn!("Download launch failed: {}", e);
                Response::error(e.to_string())
            }
        }
    }

    async fn handle_fetch_items(&self, url: &str) -> Response {
        let fetcher = CatalogFetcher::new(&self.config);
        match fetcher.fetch_items(url).await {
            Ok(listing) => Response::Listing(ListingReply::from(listing)),
            Err(e) => {
                warn!("Catalog fetch failed: {}", e);
                Response::error(e.to_string())
            }
        }
    }

    async fn handle_check_status(&self) -> Response {
        let aggregator = StatusAggregator::new(&self.config);
        match aggregator.snapshot().await {
            Ok(status) => Response::Status(status),
            Err(e) => {
                warn!("Status check failed: {}", e);
                Response::error(e.to_string())
            }
        }
    }
}
