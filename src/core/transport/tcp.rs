//! TCP transport implementation.
//!
//! Raw TCP socket transport with line-delimited JSON-RPC messages. Each
//! connection gets its own read loop over the shared server handler.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::TcpConfig;
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);

                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                    }

                    let server = server.clone();
                    tokio::spawn(async move {
                        Self::handle_connection(server, stream, peer_addr).await;
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Small delay to avoid spinning on persistent errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Handle a single TCP connection.
    async fn handle_connection(
        server: McpServer,
        stream: tokio::net::TcpStream,
        peer_addr: std::net::SocketAddr,
    ) {
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("Client {} disconnected cleanly", peer_addr);
                    break;
                }
                Ok(_) => {
                    if let Some(response) = server.process_line(&line).await {
                        let frame = match serde_json::to_string(&response) {
                            Ok(frame) => frame,
                            Err(e) => {
                                warn!("Failed to encode response for {}: {}", peer_addr, e);
                                continue;
                            }
                        };
                        if write_half.write_all(frame.as_bytes()).await.is_err()
                            || write_half.write_all(b"\n").await.is_err()
                        {
                            warn!("Failed to write to {}", peer_addr);
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!("Error while serving client {}: {}", peer_addr, e);
                    break;
                }
            }
        }
    }
}
