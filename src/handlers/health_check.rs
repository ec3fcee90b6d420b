use crate::config::ServerConfig;
use crate::protocol::ToolResult;
use crate::status::HealthStatus;

/// Handle a `health_check` tool call.
///
/// Always succeeds; the only side effect is reading the clock. Each call
/// produces a freshly stamped snapshot.
pub async fn handle(config: &ServerConfig) -> ToolResult {
    let snapshot = HealthStatus::healthy(&config.service_name, &config.service_version);

    match serde_json::to_string(&snapshot) {
        Ok(json) => ToolResult::text(json),
        Err(e) => {
            tracing::error!("health snapshot serialization failed: {e}");
            ToolResult::error("Internal error serializing health status")
        }
    }
}
