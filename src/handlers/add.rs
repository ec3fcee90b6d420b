use crate::protocol::{AddParams, ToolResult};

/// Handle an `add` tool call.
///
/// Pure i64 sum, returned as decimal text. Overflow is a tool error, not
/// a wrapped result.
pub async fn handle(params: AddParams) -> ToolResult {
    match params.a.checked_add(params.b) {
        Some(sum) => ToolResult::text(sum.to_string()),
        None => ToolResult::error(format!(
            "Integer overflow: {} + {} exceeds i64 range",
            params.a, params.b
        )),
    }
}
