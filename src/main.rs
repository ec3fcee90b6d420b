use mcp_health_server::config::ServerConfig;
use mcp_health_server::server::McpServer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr; stdout is the JSON-RPC channel.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    info!(
        service = %config.service_name,
        version = %config.service_version,
        "starting MCP server"
    );

    let mut server = McpServer::new(config);
    if let Err(e) = server.run().await {
        error!("fatal server error: {e}");
        std::process::exit(1);
    }
}
