use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::config::CheckerConfig;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse, RpcId, ToolCallParams, ToolResult};

use super::error::ProbeError;

/// Invoke a named remote operation with a bounded wait.
///
/// This is the seam between the checker and whatever carries the call; the
/// production implementation is [`StdioTransport`], tests substitute their
/// own.
#[async_trait]
pub trait ToolTransport {
    /// Call `tool` with `arguments`, returning the text payload of the tool
    /// result. The whole exchange must complete within `timeout`.
    async fn invoke(
        &mut self,
        tool: &str,
        arguments: Value,
        timeout: Duration,
    ) -> Result<String, ProbeError>;
}

/// Transport that spawns the server binary and speaks newline-delimited
/// JSON-RPC 2.0 over its stdio, the standard MCP stdio transport.
///
/// The child's stderr is inherited so server diagnostics stay visible; the
/// pipe connection persists until [`shutdown`](Self::shutdown) or drop
/// (which kills the child).
pub struct StdioTransport {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    next_id: i64,
}

impl StdioTransport {
    /// Spawn the configured server command and complete the MCP handshake.
    ///
    /// The handshake is bounded by the same probe timeout as tool calls.
    pub async fn connect(config: &CheckerConfig) -> Result<Self, ProbeError> {
        let mut parts = config.server_command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ProbeError::ProbeFailure("server command is empty".into()))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ProbeError::ProbeFailure(format!("failed to spawn {program}: {e}"))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProbeError::ProbeFailure("child stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProbeError::ProbeFailure("child stdout unavailable".into()))?;

        let mut transport = Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
            next_id: 1,
        };
        transport.handshake(config.probe_timeout).await?;
        Ok(transport)
    }

    /// Close the pipe and reap the server process.
    ///
    /// The server exits cleanly on stdin EOF.
    pub async fn shutdown(mut self) -> Result<(), ProbeError> {
        drop(self.stdin);
        self.child.wait().await?;
        Ok(())
    }

    async fn handshake(&mut self, timeout: Duration) -> Result<(), ProbeError> {
        let params = serde_json::json!({
            "protocolVersion": "2024-11-05",
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let resp = self.request("initialize", params, timeout).await?;
        if let Some(err) = resp.error {
            return Err(ProbeError::ProbeFailure(format!(
                "initialize rejected: {}",
                err.message
            )));
        }

        self.send(&JsonRpcRequest::notification("notifications/initialized"))
            .await
    }

    fn fresh_id(&mut self) -> RpcId {
        let id = self.next_id;
        self.next_id += 1;
        RpcId::Number(id)
    }

    async fn send(&mut self, req: &JsonRpcRequest) -> Result<(), ProbeError> {
        let line = serde_json::to_string(req)
            .map_err(|e| ProbeError::ProbeFailure(format!("request serialization failed: {e}")))?;
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// One request/response exchange, bounded by `timeout`.
    async fn request(
        &mut self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<JsonRpcResponse, ProbeError> {
        let req = JsonRpcRequest::call(self.fresh_id(), method, params);

        let exchange = async {
            self.send(&req).await?;

            let mut line = String::new();
            let n = self.reader.read_line(&mut line).await?;
            if n == 0 {
                return Err(ProbeError::ProbeFailure(
                    "server closed the connection".into(),
                ));
            }

            let resp: JsonRpcResponse = serde_json::from_str(line.trim())?;
            Ok(resp)
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(res) => res,
            Err(_) => Err(ProbeError::Timeout(timeout)),
        }
    }
}

#[async_trait]
impl ToolTransport for StdioTransport {
    async fn invoke(
        &mut self,
        tool: &str,
        arguments: Value,
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        let params = serde_json::to_value(ToolCallParams {
            name: tool.to_string(),
            arguments: Some(arguments),
        })
        .map_err(|e| ProbeError::ProbeFailure(format!("request serialization failed: {e}")))?;

        let resp = self.request("tools/call", params, timeout).await?;

        if let Some(err) = resp.error {
            return Err(ProbeError::ProbeFailure(err.message));
        }
        let result = resp.result.ok_or_else(|| {
            ProbeError::ProbeFailure("response carried neither result nor error".into())
        })?;

        let tool_result: ToolResult = serde_json::from_value(result)?;
        let text = tool_result
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default();

        if tool_result.is_error {
            return Err(ProbeError::ProbeFailure(text));
        }
        Ok(text)
    }
}
