//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: Raw TCP socket with line-delimited JSON-RPC - feature: `tcp`
//! - **HTTP**: JSON-RPC over POST plus an SSE event channel - feature: `http`
//!
//! Each transport owns framing and I/O: it produces decoded requests for the
//! server handler and writes back the responses, one per request. Malformed
//! frames are reported per-frame and never abort the stream; end-of-stream
//! terminates the read loop cleanly.
//!
//! # Feature Flags
//!
//! Transport implementations are conditionally compiled based on features:
//! - `stdio` (default): STDIO transport - minimal dependencies
//! - `tcp`: TCP transport - adds tokio/net
//! - `http`: HTTP transport - adds axum, tower, tower-http, tokio-stream

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
