//! Greeting for a list of people.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

#[derive(Debug, Deserialize)]
struct GroupParams {
    people: Vec<String>,
}

/// Greet every person in a list of names.
pub struct GroupGreetingTool;

impl GroupGreetingTool {
    pub const NAME: &'static str = "group_greeting";
    pub const DESCRIPTION: &'static str = "Greet every person in a list of names";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Arc::new(Self))
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new().field(
            FieldSpec::required("people", FieldKind::Array)
                .description("Names of the people to greet")
                .items(FieldKind::String),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for GroupGreetingTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: GroupParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let greetings: Vec<String> = params
            .people
            .iter()
            .map(|name| format!("Hello, {name}!"))
            .collect();
        Ok(Value::String(greetings.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::validate;
    use serde_json::json;

    #[tokio::test]
    async fn test_greets_everyone() {
        let args = validate(
            &GroupGreetingTool::schema(),
            &json!({"people": ["Ann", "Ben"]}),
        )
        .unwrap();

        let result = GroupGreetingTool.call(args).await.unwrap();
        assert_eq!(result, json!("Hello, Ann!, Hello, Ben!"));
    }

    #[tokio::test]
    async fn test_empty_list_produces_empty_greeting() {
        let args = validate(&GroupGreetingTool::schema(), &json!({"people": []})).unwrap();
        let result = GroupGreetingTool.call(args).await.unwrap();
        assert_eq!(result, json!(""));
    }

    #[test]
    fn test_non_string_elements_rejected() {
        assert!(validate(&GroupGreetingTool::schema(), &json!({"people": ["Ann", 5]})).is_err());
    }
}
