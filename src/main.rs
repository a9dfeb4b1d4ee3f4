//! gamdl Bridge native messaging host
//!
//! Reads one framed request from stdin, dispatches it, writes one framed
//! response to stdout, and exits. Logging goes to stderr: stdout carries
//! the message protocol and must see no other bytes.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gamdl_bridge::app::Dispatcher;
use gamdl_bridge::cli::Cli;
use gamdl_bridge::config::BridgeConfig;
use gamdl_bridge::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    // Errors here never reach stdout; the dispatcher has already framed a
    // response for anything the caller should see
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main host logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok(); // Ignore errors if file doesn't exist

    // Parse command line arguments (the browser appends the extension
    // origin and sometimes a window handle; both are collected and ignored)
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("gamdl Bridge v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = BridgeConfig::load(cli.global.config.clone()).await?;
    if let Some(dir) = cli.global.progress_dir.clone() {
        config.progress_dir = Some(dir);
    }

    let dispatcher = Dispatcher::new(config);

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    dispatcher.run_once(&mut stdin, &mut stdout).await
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    // Create environment filter
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("gamdl_bridge={}", log_level).parse().unwrap());

    // Stderr only; stdout belongs to the framed protocol
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
