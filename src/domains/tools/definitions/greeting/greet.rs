//! Single-name greeting.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

#[derive(Debug, Deserialize)]
struct GreetParams {
    name: String,
}

/// Greet a person by name.
pub struct GreetTool;

impl GreetTool {
    pub const NAME: &'static str = "greet";
    pub const DESCRIPTION: &'static str = "Greet a person by name";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Arc::new(Self))
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new()
            .field(FieldSpec::required("name", FieldKind::String).description("Name to greet"))
    }
}

#[async_trait::async_trait]
impl ToolHandler for GreetTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: GreetParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        Ok(Value::String(format!("Hello, {}!", params.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::validate;
    use serde_json::json;

    #[tokio::test]
    async fn test_greets_by_name() {
        let args = validate(&GreetTool::schema(), &json!({"name": "Ann"})).unwrap();
        let result = GreetTool.call(args).await.unwrap();
        assert_eq!(result, json!("Hello, Ann!"));
    }

    #[test]
    fn test_name_is_required() {
        assert!(validate(&GreetTool::schema(), &json!({})).is_err());
    }
}
