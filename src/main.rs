//! Lantern - MCP server for Jira Service Management
//!
//! This binary runs as an MCP server using stdio transport.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `JIRA_BASE_URL`: Jira site URL
//! - `JIRA_EMAIL`: Account email
//! - `JIRA_API_TOKEN`: API token for the account
//! - `JIRA_SERVICE_DESK`: Service desk id or project key
//!
//! # Usage
//!
//! ```bash
//! JIRA_BASE_URL=https://example.atlassian.net JIRA_EMAIL=agent@example.com \
//!     JIRA_API_TOKEN=... JIRA_SERVICE_DESK=SUP ./lantern
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use lantern::{config, jira_client, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lantern=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Lantern MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(base_url = %config.base_url, service_desk = %config.service_desk, "Configuration loaded");

    let jira = jira_client::JiraClient::new(&config).context("Failed to create Jira client")?;

    tracing::info!("Testing connection to Jira...");
    if let Err(e) = jira.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Jira. \
             Check configuration and network connectivity."
        );
    }

    let server = server::LanternServer::new(jira);

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
