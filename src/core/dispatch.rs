//! Request dispatcher - routes a decoded tool call to its handler.
//!
//! The dispatcher is a pure routing layer: look the tool up, validate the
//! arguments, invoke the handler, wrap the outcome. Handler failures and
//! panics are converted into structured error responses and never propagate;
//! a bad tool call can never take the server down with it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{instrument, warn};

use super::protocol::{error_codes, CallToolResult, JsonRpcResponse};
use super::registry::ToolRegistry;
use super::schema::validate;

/// A decoded `tools/call` request, consumed once by [`Dispatcher::dispatch`].
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    /// Correlation token copied into the response.
    pub id: Option<Value>,
    pub tool_name: String,
    pub arguments: Value,
}

/// Routes tool calls against a read-only registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch a single tool call and produce exactly one response.
    #[instrument(skip(self, request), fields(tool = %request.tool_name))]
    pub async fn dispatch(&self, request: ToolCallRequest) -> JsonRpcResponse {
        let descriptor = match self.registry.lookup(&request.tool_name) {
            Some(descriptor) => descriptor,
            None => {
                warn!("Unknown tool requested: {}", request.tool_name);
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::UNKNOWN_TOOL,
                    format!("Unknown tool: {}", request.tool_name),
                );
            }
        };

        let args = match validate(&descriptor.schema, &request.arguments) {
            Ok(args) => args,
            Err(validation) => {
                warn!("Argument validation failed: {}", validation);
                let detail = serde_json::to_value(&validation).ok();
                return JsonRpcResponse::error_with_data(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    validation.to_string(),
                    detail,
                );
            }
        };

        // Run the handler in its own task: a panicking tool is reported as a
        // handler failure instead of unwinding through the transport loop.
        let handler = descriptor.handler.clone();
        let outcome = tokio::spawn(async move { handler.call(args).await }).await;

        match outcome {
            Ok(Ok(value)) => {
                let result = CallToolResult::from_value(&value);
                match serde_json::to_value(result) {
                    Ok(result) => JsonRpcResponse::success(request.id, result),
                    Err(e) => JsonRpcResponse::error(
                        request.id,
                        error_codes::INTERNAL_ERROR,
                        e.to_string(),
                    ),
                }
            }
            Ok(Err(tool_error)) => {
                warn!("Tool `{}` failed: {}", request.tool_name, tool_error);
                JsonRpcResponse::error(
                    request.id,
                    error_codes::HANDLER_FAILURE,
                    tool_error.to_string(),
                )
            }
            Err(join_error) => {
                warn!("Tool `{}` panicked: {}", request.tool_name, join_error);
                JsonRpcResponse::error(
                    request.id,
                    error_codes::HANDLER_FAILURE,
                    format!("tool `{}` aborted: {}", request.tool_name, join_error),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{ToolDescriptor, ToolHandler, ToolRegistry};
    use crate::core::schema::{FieldKind, FieldSpec, ToolSchema, ValidatedArgs};
    use crate::domains::tools::ToolError;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct GreetHandler;

    #[async_trait::async_trait]
    impl ToolHandler for GreetHandler {
        async fn call(&self, args: ValidatedArgs) -> Result<Value, ToolError> {
            let name = args.get("name").and_then(Value::as_str).unwrap_or("world");
            Ok(json!(format!("Hello, {}!", name)))
        }
    }

    struct FailingHandler;

    #[async_trait::async_trait]
    impl ToolHandler for FailingHandler {
        async fn call(&self, _args: ValidatedArgs) -> Result<Value, ToolError> {
            Err(ToolError::execution_failed("upstream API returned 500"))
        }
    }

    struct PanickingHandler;

    #[async_trait::async_trait]
    impl ToolHandler for PanickingHandler {
        async fn call(&self, _args: ValidatedArgs) -> Result<Value, ToolError> {
            panic!("boom");
        }
    }

    struct TracingHandler {
        invoked: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl ToolHandler for TracingHandler {
        async fn call(&self, _args: ValidatedArgs) -> Result<Value, ToolError> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(Value::Null)
        }
    }

    struct SlowHandler;

    #[async_trait::async_trait]
    impl ToolHandler for SlowHandler {
        async fn call(&self, _args: ValidatedArgs) -> Result<Value, ToolError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(json!("slow done"))
        }
    }

    fn greet_schema() -> ToolSchema {
        ToolSchema::new().field(FieldSpec::required("name", FieldKind::String))
    }

    fn dispatcher_with(descriptors: Vec<ToolDescriptor>) -> Dispatcher {
        let mut registry = ToolRegistry::new();
        for descriptor in descriptors {
            registry.register(descriptor).unwrap();
        }
        Dispatcher::new(Arc::new(registry))
    }

    fn call(name: &str, id: u64, arguments: Value) -> ToolCallRequest {
        ToolCallRequest {
            id: Some(json!(id)),
            tool_name: name.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_never_invokes_handlers() {
        let invoked = Arc::new(AtomicBool::new(false));
        let dispatcher = dispatcher_with(vec![ToolDescriptor::new(
            "traced",
            "Records invocation",
            ToolSchema::new(),
            Arc::new(TracingHandler {
                invoked: invoked.clone(),
            }),
        )]);

        let response = dispatcher.dispatch(call("nope", 1, json!({}))).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::UNKNOWN_TOOL);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_handler() {
        let invoked = Arc::new(AtomicBool::new(false));
        let dispatcher = dispatcher_with(vec![ToolDescriptor::new(
            "traced",
            "Records invocation",
            greet_schema(),
            Arc::new(TracingHandler {
                invoked: invoked.clone(),
            }),
        )]);

        let response = dispatcher.dispatch(call("traced", 2, json!({}))).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["field"], "name");
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_greet_scenario() {
        let dispatcher = dispatcher_with(vec![ToolDescriptor::new(
            "greet",
            "Greet someone by name",
            greet_schema(),
            Arc::new(GreetHandler),
        )]);

        let response = dispatcher
            .dispatch(call("greet", 3, json!({"name": "Ann"})))
            .await;

        assert_eq!(response.id, Some(json!(3)));
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "Hello, Ann!");
        assert_eq!(result["isError"], false);
    }

    #[tokio::test]
    async fn test_handler_failure_keeps_dispatcher_alive() {
        let dispatcher = dispatcher_with(vec![
            ToolDescriptor::new(
                "failing",
                "Always fails",
                ToolSchema::new(),
                Arc::new(FailingHandler),
            ),
            ToolDescriptor::new("greet", "Greets", greet_schema(), Arc::new(GreetHandler)),
        ]);

        let response = dispatcher.dispatch(call("failing", 4, json!({}))).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::HANDLER_FAILURE);
        assert!(error.message.contains("upstream API returned 500"));

        // Subsequent requests are still served.
        let response = dispatcher
            .dispatch(call("greet", 5, json!({"name": "Bob"})))
            .await;
        assert!(response.result.is_some());
    }

    #[tokio::test]
    async fn test_handler_panic_reported_as_failure() {
        let dispatcher = dispatcher_with(vec![
            ToolDescriptor::new(
                "panicking",
                "Always panics",
                ToolSchema::new(),
                Arc::new(PanickingHandler),
            ),
            ToolDescriptor::new("greet", "Greets", greet_schema(), Arc::new(GreetHandler)),
        ]);

        let response = dispatcher.dispatch(call("panicking", 6, json!({}))).await;
        assert_eq!(response.error.unwrap().code, error_codes::HANDLER_FAILURE);

        let response = dispatcher
            .dispatch(call("greet", 7, json!({"name": "Cleo"})))
            .await;
        assert!(response.result.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_correlate_by_id() {
        let dispatcher = dispatcher_with(vec![
            ToolDescriptor::new("slow", "Sleeps", ToolSchema::new(), Arc::new(SlowHandler)),
            ToolDescriptor::new("greet", "Greets", greet_schema(), Arc::new(GreetHandler)),
        ]);

        let (slow, fast) = tokio::join!(
            dispatcher.dispatch(call("slow", 10, json!({}))),
            dispatcher.dispatch(call("greet", 11, json!({"name": "Dee"}))),
        );

        assert_eq!(slow.id, Some(json!(10)));
        assert_eq!(slow.result.unwrap()["content"][0]["text"], "slow done");
        assert_eq!(fast.id, Some(json!(11)));
        assert_eq!(fast.result.unwrap()["content"][0]["text"], "Hello, Dee!");
    }
}
