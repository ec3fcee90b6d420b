pub mod add;
pub mod health_check;

use tracing::debug;

use crate::config::ServerConfig;
use crate::protocol::{
    AddParams, InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    ToolResult,
};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, config: &ServerConfig) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            if let Some(init) = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v.clone()).ok())
            {
                let client = init
                    .client_info
                    .and_then(|c| c.name)
                    .unwrap_or_else(|| "unknown".into());
                debug!(
                    client = %client,
                    protocol = init.protocol_version.as_deref().unwrap_or("unspecified"),
                    "client initializing"
                );
            }

            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": "health_check",
                        "description": "Report server liveness: status, timestamp, service, version",
                        "inputSchema": {
                            "type": "object",
                            "properties": {}
                        }
                    },
                    {
                        "name": "add",
                        "description": "Add two integers",
                        "inputSchema": {
                            "type": "object",
                            "required": ["a", "b"],
                            "properties": {
                                "a": {
                                    "type": "integer",
                                    "description": "First addend"
                                },
                                "b": {
                                    "type": "integer",
                                    "description": "Second addend"
                                }
                            }
                        }
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, config).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, config: &ServerConfig) -> ToolResult {
    match params.name.as_str() {
        "health_check" => health_check::handle(config).await,

        "add" => {
            let add_params: AddParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!("Invalid arguments for add: {e}"));
                    }
                },
                None => {
                    return ToolResult::error("Missing arguments for add");
                }
            };
            add::handle(add_params).await
        }

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}
