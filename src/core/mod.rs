//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! the wire protocol types, the schema validator, the tool registry, the
//! request dispatcher, configuration, error handling, and the transport
//! layer.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod server;
pub mod transport;

pub use config::Config;
pub use dispatch::{Dispatcher, ToolCallRequest};
pub use error::{Error, Result};
pub use protocol::{JsonRpcRequest, JsonRpcResponse};
pub use registry::{RegistryError, ToolDescriptor, ToolHandler, ToolRegistry};
pub use schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs, ValidationError};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
