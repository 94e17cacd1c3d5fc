//! HTTP transport implementation.
//!
//! JSON-RPC over POST requests, plus a server-push SSE channel that mirrors
//! every response to subscribed clients (the fast-mcp style
//! `/mcp/messages` + `/mcp/sse` endpoint pair). POST callers always receive
//! their response inline; the SSE stream is an additional delivery channel,
//! not a replacement.

use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::{get, post},
};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument};

use super::config::HttpConfig;
use super::{TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::protocol::JsonRpcRequest;

/// Capacity of the SSE fan-out channel; slow subscribers miss events rather
/// than applying backpressure to the RPC path.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    events: broadcast::Sender<String>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = AppState { server, events };

        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route(&self.config.sse_path, get(handle_sse))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over HTTP)", addr);
        info!("  -> JSON-RPC: POST {}", self.config.rpc_path);
        info!("  -> Events:   GET  {}", self.config.sse_path);
        info!("  -> Health:   GET  /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "documentation": "POST JSON-RPC messages to the rpc endpoint; subscribe to the SSE endpoint for server-push delivery"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    info!("Received JSON-RPC request: {}", request.method);

    match state.server.process_request(request).await {
        Some(response) => {
            // Mirror the response to SSE subscribers; no-op when nobody is
            // listening.
            if let Ok(frame) = serde_json::to_string(&response) {
                let _ = state.events.send(frame);
            }
            (StatusCode::OK, Json(response)).into_response()
        }
        // Notifications receive no response body.
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Handle SSE subscriptions: every response produced by the RPC endpoint is
/// delivered as a `message` event.
async fn handle_sse(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client subscribed");

    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|frame| async move {
        frame
            .ok()
            .map(|data| Ok(Event::default().event("message").data(data)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
