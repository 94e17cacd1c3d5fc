//! Tool registry - the mapping from tool name to schema and handler.
//!
//! The registry is populated once during process initialization and is
//! read-only afterwards, so it can be shared across transports behind a
//! plain `Arc` with no locking on the dispatch path. Registering two tools
//! under the same name is a startup-time error that aborts initialization.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::schema::{ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

/// Errors raised while building the registry. All of them are fatal: a
/// registry in an inconsistent state cannot safely serve requests.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),

    /// A tool schema declares the same field twice.
    #[error("tool `{tool}` declares duplicate schema field `{field}`")]
    DuplicateField { tool: String, field: String },
}

/// The capability interface every tool implements.
///
/// A handler receives its validated argument bag and returns a
/// JSON-serializable value or a domain error. This is the only contract the
/// dispatcher requires from tool implementations.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError>;
}

/// A registered tool: name, description, argument schema, and handler.
///
/// Owned exclusively by the registry and immutable after registration.
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub schema: ToolSchema,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ToolSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler,
        }
    }
}

/// Mapping from tool name to descriptor, built once at startup.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDescriptor>,
    // Registration order, for stable tools/list output.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool descriptor.
    ///
    /// Fails with [`RegistryError::DuplicateName`] if the name is taken and
    /// [`RegistryError::DuplicateField`] if the schema declares a field
    /// twice.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), RegistryError> {
        if let Some(field) = descriptor.schema.duplicate_field() {
            return Err(RegistryError::DuplicateField {
                tool: descriptor.name.clone(),
                field,
            });
        }
        if self.tools.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name.clone()));
        }
        self.order.push(descriptor.name.clone());
        self.tools.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    /// Registered tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{FieldKind, FieldSpec};
    use serde_json::json;

    struct EchoHandler;

    #[async_trait::async_trait]
    impl ToolHandler for EchoHandler {
        async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
            Ok(args.into_value())
        }
    }

    fn echo_descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            "Echoes its arguments",
            ToolSchema::new().field(FieldSpec::optional("value", FieldKind::String)),
            Arc::new(EchoHandler),
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("echo")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("echo").is_some());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("echo")).unwrap();

        let err = registry.register(echo_descriptor("echo")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "echo"));
    }

    #[test]
    fn test_duplicate_schema_field_rejected() {
        let schema = ToolSchema::new()
            .field(FieldSpec::required("q", FieldKind::String))
            .field(FieldSpec::optional("q", FieldKind::Integer));
        let descriptor =
            ToolDescriptor::new("bad", "Duplicate field", schema, Arc::new(EchoHandler));

        let err = ToolRegistry::new().register(descriptor).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateField { .. }));
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("b")).unwrap();
        registry.register(echo_descriptor("a")).unwrap();

        assert_eq!(registry.tool_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_handler_callable_through_descriptor() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("echo")).unwrap();

        let descriptor = registry.lookup("echo").unwrap();
        let args = crate::core::schema::validate(
            &descriptor.schema,
            &json!({"value": "hi"}),
        )
        .unwrap();
        let result = tokio_test::block_on(descriptor.handler.call(args)).unwrap();
        assert_eq!(result, json!({"value": "hi"}));
    }
}
