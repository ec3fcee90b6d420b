use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
///
/// Constructed once at startup with its configuration and handed to the
/// runtime; there is no process-global server state.
pub struct McpServer {
    config: ServerConfig,
    initialized: bool,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                debug!("stdin closed, shutting down");
                break;
            }

            if let Some(resp) = self.process_line(&raw).await {
                write_response(&mut stdout, &resp).await?;
            }
        }

        Ok(())
    }

    /// Handle one raw input line; `None` means nothing to write back
    /// (blank line or notification).
    async fn process_line(&mut self, raw: &[u8]) -> Option<JsonRpcResponse> {
        if raw.len() > MAX_MESSAGE_BYTES {
            warn!(
                "message too large: {} bytes (limit {MAX_MESSAGE_BYTES})",
                raw.len()
            );
            return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
        }

        let trimmed = match std::str::from_utf8(raw) {
            Ok(s) => s.trim(),
            Err(_) => {
                warn!("message is not valid UTF-8");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        if trimmed.is_empty() {
            return None;
        }

        let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!("request parse error: {e}");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_request(),
            ));
        }

        // Initialization gate: only `initialize` is allowed before the
        // handshake completes.
        if !self.initialized && req.method != "initialize" {
            if req.id.is_none() {
                return None;
            }
            return Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_request_with("Server not initialized"),
            ));
        }

        let resp = handlers::dispatch(&req, &self.config).await;

        if req.method == "initialize" {
            self.initialized = true;
        }

        resp
    }
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = serde_json::to_string(resp)?;
    stdout.write_all(out.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
