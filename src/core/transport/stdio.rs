//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended
//! mode. One JSON object per line on stdin, one response per request on
//! stdout. Logging goes to stderr so stdout stays a clean protocol channel.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use super::TransportResult;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin closes.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("STDIO transport shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = server.process_line(&line).await {
                        let frame = serde_json::to_string(&response)?;
                        stdout.write_all(frame.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }
}
