//! Travel MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing travel
//! search tools (SerpApi flights and hotels), greeting demos, and a Cloud Run
//! inventory scanner, with a modular architecture organized by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure - configuration, wire protocol, argument
//!   schemas and validation, the tool registry, the request dispatcher, and
//!   the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **search**: SerpApi client shared by the travel tools
//!   - **tools**: Tool definitions and registry assembly
//!
//! # Example
//!
//! ```rust,no_run
//! use travel_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
