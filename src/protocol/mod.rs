pub mod request;
pub mod response;

pub use request::{AddParams, InitializeParams, JsonRpcRequest, RpcId, ToolCallParams};
pub use response::{JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};
