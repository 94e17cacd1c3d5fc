//! MCP server implementation and lifecycle management.
//!
//! [`McpServer`] owns the tool registry (built once at startup) and the
//! dispatcher, and routes decoded JSON-RPC requests to protocol handlers.
//! Every transport feeds frames through [`McpServer::process_line`] or
//! [`McpServer::process_request`]; framing and I/O stay in the transport
//! layer.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use super::dispatch::{Dispatcher, ToolCallRequest};
use super::protocol::{JsonRpcRequest, JsonRpcResponse, ToolCallParams, MCP_VERSION};
use super::registry::ToolRegistry;
use crate::domains::tools::build_registry;

/// The main MCP server handler, shared by every transport.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry, read-only after construction.
    registry: Arc<ToolRegistry>,

    /// Dispatcher routing tool calls against the registry.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if tool registration fails (duplicate tool name or malformed
    /// schema); callers should treat that as fatal and exit non-zero.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(build_registry(config.clone())?);
        info!("Registered {} tools", registry.len());

        Ok(Self {
            dispatcher: Dispatcher::new(registry.clone()),
            config,
            registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// List all registered tools as `tools/list` metadata objects.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .iter()
            .map(|descriptor| {
                json!({
                    "name": descriptor.name,
                    "description": descriptor.description,
                    "inputSchema": descriptor.schema.to_json_schema(),
                })
            })
            .collect()
    }

    /// Process one raw input frame.
    ///
    /// Returns `None` for blank lines and notifications. A malformed frame
    /// yields a parse-error response and does not terminate the stream.
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse request frame: {}", e);
                return Some(JsonRpcResponse::parse_error(format!("Invalid JSON: {}", e)));
            }
        };

        self.process_request(request).await
    }

    /// Process a decoded JSON-RPC request.
    ///
    /// Notifications return `None`; every other request receives exactly one
    /// response.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn process_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::invalid_request(request.id));
        }

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request)),
            "initialized" => Some(JsonRpcResponse::success(request.id, Value::Null)),
            "tools/list" => Some(self.handle_tools_list(request)),
            "tools/call" => Some(self.handle_tools_call(request).await),
            method if method.starts_with("notifications/") => {
                debug!("Consumed notification: {}", method);
                None
            }
            method => {
                warn!("Unknown method: {}", method);
                Some(JsonRpcResponse::method_not_found(request.id, method))
            }
        }
    }

    /// Handle the MCP `initialize` handshake.
    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = json!({
            "protocolVersion": MCP_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version(),
            },
        });

        JsonRpcResponse::success(request.id, result)
    }

    /// Handle `tools/list`.
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id, json!({ "tools": self.list_tools() }))
    }

    /// Handle `tools/call` by delegating to the dispatcher.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = match request.params {
            Some(params) => params,
            None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
        };

        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::invalid_params(
                    request.id,
                    format!("Invalid parameters: {}", e),
                );
            }
        };

        self.dispatcher
            .dispatch(ToolCallRequest {
                id: request.id,
                tool_name: params.name,
                arguments: params.arguments,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::error_codes;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn request(method: &str, id: u64, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_reports_protocol_version() {
        let server = test_server();
        let response = server
            .process_request(request("initialize", 1, None))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_VERSION);
        assert_eq!(result["serverInfo"]["name"], server.name());
    }

    #[tokio::test]
    async fn test_tools_list_contains_registered_tools() {
        let server = test_server();
        let response = server
            .process_request(request("tools/list", 2, None))
            .await
            .unwrap();

        let result = response.result.unwrap();
        let names: Vec<_> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        for expected in [
            "flight_search_one_way",
            "flight_search_round_trip",
            "hotel_search",
            "server_meta",
            "greet",
            "greet_full_name",
            "group_greeting",
            "cloud_run_services",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let server = test_server();
        let response = server
            .process_request(request("resources/list", 3, None))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notifications_produce_no_response() {
        let server = test_server();
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(server.process_request(notification).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_frame_yields_parse_error() {
        let server = test_server();
        let response = server.process_line("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_blank_line_is_skipped() {
        let server = test_server();
        assert!(server.process_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_tools_call_greet_end_to_end() {
        let server = test_server();
        let response = server
            .process_line(
                r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"greet","arguments":{"name":"Ann"}}}"#,
            )
            .await
            .unwrap();

        assert_eq!(response.id, Some(json!(9)));
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "Hello, Ann!");
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let server = test_server();
        let response = server
            .process_request(request("tools/call", 10, None))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version_rejected() {
        let server = test_server();
        let bad = JsonRpcRequest {
            jsonrpc: "1.0".to_string(),
            id: Some(json!(11)),
            method: "tools/list".to_string(),
            params: None,
        };
        let response = server.process_request(bad).await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
    }
}
