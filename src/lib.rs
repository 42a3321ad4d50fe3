//! # Lantern
//!
//! Lantern is an MCP (Model Context Protocol) server for Jira Service Management.
//!
//! It exposes service desk operations as MCP tools, so an assistant can work
//! a help desk queue through natural language: read requests, reply to
//! customers, move requests through the workflow and assign them.
//!
//! ## Features
//!
//! - **Queues**: List queues and the requests in each
//! - **Requests**: View full details, including comments, attachments,
//!   available transitions and assignable users
//! - **Write operations**: Create and update requests, add public or internal comments
//! - **Triage**: Change status, priority and assignee
//! - **Markdown**: Descriptions and comments are written in a small markdown
//!   dialect and stored as Atlassian Document Format (see [`adf`])
//! - **Error handling**: Automatic retry for transient failures with exponential backoff
//! - **Security**: API tokens are never logged or exposed in error messages
//!
//! ## Architecture
//!
//! - [`adf`] - Markdown to ADF encoding and ADF to text decoding
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`jira_client`] - HTTP client for the Jira and service desk REST APIs
//! - [`models`] - Data models for Jira API responses
//! - [`server`] - MCP server implementation with tool routing
//! - [`tools`] - Tool input parameter structs
//!
//! ## Configuration
//!
//! Lantern requires four environment variables:
//!
//! - `JIRA_BASE_URL`: Site URL, e.g. `https://example.atlassian.net`
//! - `JIRA_EMAIL`: Account email for basic authentication
//! - `JIRA_API_TOKEN`: API token for that account
//! - `JIRA_SERVICE_DESK`: Service desk id (`4`) or project key (`SUP`)
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `lantern=debug`)
//!
//! ## Example
//!
//! Using the [`JiraClient`](jira_client::JiraClient) directly:
//!
//! ```ignore
//! use lantern::config::Config;
//! use lantern::jira_client::JiraClient;
//!
//! async fn example() -> Result<(), lantern::error::LanternError> {
//!     let config = Config::from_env()?;
//!     let client = JiraClient::new(&config)?;
//!
//!     for queue in client.list_queues().await? {
//!         let requests = client.list_queue_requests(&queue.id).await?;
//!         println!("{}: {} request(s)", queue.name, requests.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adf;
pub mod config;
pub mod error;
pub mod jira_client;
pub mod models;
pub mod server;
pub mod tools;
