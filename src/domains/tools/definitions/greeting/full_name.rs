//! Greeting built from a nested person object.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::core::registry::{ToolDescriptor, ToolHandler};
use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
use crate::domains::tools::ToolError;

#[derive(Debug, Deserialize)]
struct FullNameParams {
    person: Person,
}

#[derive(Debug, Deserialize)]
struct Person {
    first_name: Option<String>,
    last_name: Option<String>,
}

/// Greet a person described by a nested object with first and last name.
pub struct GreetFullNameTool;

impl GreetFullNameTool {
    pub const NAME: &'static str = "greet_full_name";
    pub const DESCRIPTION: &'static str = "Greet a person by their full name";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Arc::new(Self))
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new().field(
            FieldSpec::required("person", FieldKind::Object)
                .description("Person to greet")
                .nested(
                    ToolSchema::new()
                        .field(
                            FieldSpec::optional("first_name", FieldKind::String)
                                .description("First name"),
                        )
                        .field(
                            FieldSpec::optional("last_name", FieldKind::String)
                                .description("Last name"),
                        ),
                ),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for GreetFullNameTool {
    async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
        let params: FullNameParams = args
            .deserialize()
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let first = params.person.first_name.unwrap_or_default();
        let last = params.person.last_name.unwrap_or_default();
        Ok(Value::String(format!(
            "Hello, First: {first} Last: {last}!"
        )))
    }
}
