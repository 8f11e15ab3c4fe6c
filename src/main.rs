//! Umami MCP - MCP server for Umami web analytics
//!
//! This binary runs as an MCP server over stdio, letting an MCP client
//! query and manage an Umami instance.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `UMAMI_URL`: Base URL of your Umami instance
//! - `UMAMI_API_KEY`: API key, or
//! - `UMAMI_USERNAME` and `UMAMI_PASSWORD`: login credentials
//!
//! # Usage
//!
//! ```bash
//! UMAMI_URL=https://analytics.example.com UMAMI_API_KEY=xxx ./umami-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use umami_mcp::{client, config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("umami_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Umami MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env();

    tracing::debug!(
        base_url = %config.base_url,
        api_key_auth = config.uses_api_key(),
        "Configuration loaded"
    );

    let client = client::UmamiClient::new(config).context("Failed to create Umami client")?;

    // Missing settings are reported per call; start anyway
    if let Err(e) = client.preflight() {
        tracing::warn!(error = %e, "Umami is not fully configured, tool calls will fail");
    }

    let server = server::UmamiServer::new(client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
