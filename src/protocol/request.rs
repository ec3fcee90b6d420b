use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 ID — may be a number or string per spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
///
/// Serialized by the client transport, deserialized by the server loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Request expecting a response.
    pub fn call(id: RpcId, method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: Some(id),
            method: method.into(),
            params: Some(params),
        }
    }

    /// Notification — no id, no response expected.
    pub fn notification(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: None,
            method: method.into(),
            params: None,
        }
    }
}

/// Parameters for the `add` tool.
///
/// Sums are computed in i64; overflow is reported as a tool error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParams {
    pub a: i64,
    pub b: i64,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}
