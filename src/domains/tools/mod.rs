//! Tools domain - tool definitions and registry assembly.
//!
//! Each tool lives in its own definition module with its parameter type,
//! schema, and handler. [`build_registry`] wires every definition into the
//! shared [`crate::core::registry::ToolRegistry`] at startup.

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::build_registry;
