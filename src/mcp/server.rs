//! Line-delimited JSON-RPC transport over stdio.

use anyhow::Result;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::mcp::rpc::{RpcRequest, RpcResponse};
use crate::mcp::service::McpService;

pub struct StdioServer {
    service: McpService,
}

impl StdioServer {
    pub fn new(service: McpService) -> Self {
        Self { service }
    }

    /// Serve until stdin reaches EOF. One request per line in, one
    /// response per line out; notifications produce no output.
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();
        let mut buffer = String::new();

        info!("Lexware Office MCP Server running on stdio");

        loop {
            buffer.clear();
            if reader.read_line(&mut buffer).await? == 0 {
                info!("stdin closed, shutting down");
                break;
            }

            let line = buffer.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<RpcRequest>(line) {
                Ok(request) => {
                    let is_notification = request.id.is_none();
                    self.service
                        .handle_request(request)
                        .await
                        .filter(|_| !is_notification)
                }
                Err(err) => {
                    error!("failed to parse JSON-RPC request: {}", err);
                    Some(RpcResponse::parse_error(err.to_string()))
                }
            };

            if let Some(response) = response {
                let payload = serde_json::to_string(&response)?;
                stdout.write_all(payload.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }
}
