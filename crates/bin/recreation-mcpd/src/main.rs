//! Daemon entry point for the Hong Kong recreation MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! creative goods control plane, and serves MCP over stdio or streamable HTTP.

mod config;

use std::sync::Arc;

use recreation_core::control::RecreationControlPlane;
use recreation_core::fetch::HttpCsvFetcher;
use recreation_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::config::{RecreationConfig, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries the stdio transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = RecreationConfig::from_args()?;
    let fetcher = HttpCsvFetcher::new(config.fetch_timeout)?;
    let control = Arc::new(
        RecreationControlPlane::new(fetcher).with_dataset_url(config.dataset_url.clone()),
    );
    tracing::info!(
        dataset_url = %config.dataset_url,
        transport = ?config.transport,
        "starting recreation-mcpd"
    );

    match config.transport {
        Transport::Stdio => serve_stdio(control).await,
        Transport::StreamableHttp => {
            let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
                .with_stateful_mode(config.mcp_stateful)
                .with_sse_keep_alive(config.sse_keep_alive)
                .with_sse_retry(config.sse_retry);
            serve_streamable_http(control, http_config).await
        }
    }
}
