use std::io::Write;

use mcp_health_server::client::{HealthChecker, StdioTransport};
use mcp_health_server::config::CheckerConfig;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the report lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match CheckerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("health-check: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    match run(&config, &mut stdout).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("health-check: console write failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns whether a status was obtained.
async fn run(config: &CheckerConfig, out: &mut impl Write) -> std::io::Result<bool> {
    info!(command = %config.server_command, "running health check");

    let transport = match StdioTransport::connect(config).await {
        Ok(t) => t,
        Err(e) => {
            warn!("could not reach server: {e}");
            writeln!(out, "Server is unreachable")?;
            return Ok(false);
        }
    };

    let mut checker = HealthChecker::new(transport, config.probe_timeout);
    let status = checker.check_and_report(out).await?;

    if let Err(e) = checker.into_transport().shutdown().await {
        debug!("server process shutdown: {e}");
    }

    Ok(status.is_some())
}
