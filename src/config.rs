use std::time::Duration;

/// Default identity reported by the health probe.
const DEFAULT_SERVICE_NAME: &str = "MCP Server";
const DEFAULT_SERVICE_VERSION: &str = "1.0.0";

/// Default bounded wait for a probe invocation (5 seconds).
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Default command the checker spawns to reach the server.
const DEFAULT_SERVER_COMMAND: &str = "mcp-health-server";

/// Server configuration loaded from environment variables.
///
/// The service identity is what the probe reports, not the crate identity;
/// `initialize` carries the crate name/version separately.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub service_name: String,
    pub service_version: String,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `HEALTH_SERVICE_NAME` (optional, default "MCP Server")
    /// - `HEALTH_SERVICE_VERSION` (optional, default "1.0.0")
    pub fn from_env() -> Self {
        let service_name = std::env::var("HEALTH_SERVICE_NAME")
            .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
        let service_version = std::env::var("HEALTH_SERVICE_VERSION")
            .unwrap_or_else(|_| DEFAULT_SERVICE_VERSION.to_string());

        Self {
            service_name,
            service_version,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: DEFAULT_SERVICE_VERSION.to_string(),
        }
    }
}

/// Checker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub server_command: String,
    pub probe_timeout: Duration,
}

impl CheckerConfig {
    /// Load configuration from environment.
    ///
    /// - `HEALTH_SERVER_COMMAND` (optional, default "mcp-health-server") —
    ///   command spawned to reach the server
    /// - `HEALTH_PROBE_TIMEOUT_SECS` (optional, default 5) — max seconds to
    ///   wait for a probe response
    pub fn from_env() -> Result<Self, String> {
        let server_command = std::env::var("HEALTH_SERVER_COMMAND")
            .unwrap_or_else(|_| DEFAULT_SERVER_COMMAND.to_string());

        let probe_timeout_secs = match std::env::var("HEALTH_PROBE_TIMEOUT_SECS") {
            Ok(val) => val
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    "HEALTH_PROBE_TIMEOUT_SECS must be a positive integer".to_string()
                })?,
            Err(_) => DEFAULT_PROBE_TIMEOUT_SECS,
        };

        Ok(Self {
            server_command,
            probe_timeout: Duration::from_secs(probe_timeout_secs),
        })
    }
}
