//! # Umami MCP
//!
//! An MCP (Model Context Protocol) server for Umami web analytics.
//!
//! It exposes the Umami REST API as MCP tools, resources and prompts, so an
//! AI assistant can query traffic, manage websites, users and teams, and run
//! reports through natural language.
//!
//! ## Architecture
//!
//! - [`config`] - Connection settings loaded from environment variables
//! - [`error`] - Error type with secret-scrubbing display helpers
//! - [`query`] - Query-string parameters with empty-value filtering
//! - [`credentials`] - Login-token cache with expiry tracking
//! - [`client`] - The generic HTTP dispatch path shared by every operation
//! - [`models`] - Request bodies sent to Umami
//! - [`tools`] - Tool input parameter structs
//! - [`resources`] - Static MCP resources backed by GET endpoints
//! - [`prompts`] - Prompt templates for multi-tool analyses
//! - [`server`] - MCP server implementation with tool and prompt routing
//!
//! ## Configuration
//!
//! - `UMAMI_URL`: Base URL of the Umami instance
//! - `UMAMI_API_KEY`: API key (takes precedence when set)
//! - `UMAMI_USERNAME` / `UMAMI_PASSWORD`: Credentials used when no API key is set
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `umami_mcp=debug`)
//!
//! Missing settings do not stop the server from starting; every call fails
//! with a configuration error until they are provided.
//!
//! ## Security Considerations
//!
//! The API key, password and login tokens are held only in memory. They are
//! never logged, and they are scrubbed from every error message returned to
//! an MCP client.
//!
//! ## Example
//!
//! ```ignore
//! use umami_mcp::client::UmamiClient;
//! use umami_mcp::config::Config;
//! use umami_mcp::query::QueryParams;
//!
//! async fn example() -> Result<(), umami_mcp::error::UmamiError> {
//!     let client = UmamiClient::new(Config::from_env())?;
//!
//!     let query = QueryParams::new()
//!         .with("startAt", 1_700_000_000_000i64)
//!         .with("endAt", 1_700_604_800_000i64);
//!     let stats = client
//!         .get("/api/websites/3f1c.../stats", Some(&query))
//!         .await?;
//!     println!("{stats}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod prompts;
pub mod query;
pub mod resources;
pub mod server;
pub mod tools;
