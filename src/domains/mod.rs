//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: the SerpApi search backend and the tool definitions exposed to
//! clients.

pub mod search;
pub mod tools;
