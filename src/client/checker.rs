use std::io::{self, Write};
use std::time::Duration;

use serde_json::json;
use tracing::{error, warn};

use crate::status::HealthStatus;

use super::error::ProbeError;
use super::transport::ToolTransport;

/// Client-side workflow: invoke the probe once, bound the wait, and
/// normalize the outcome.
///
/// A check is terminal on its first outcome; there are no retries.
pub struct HealthChecker<T: ToolTransport> {
    transport: T,
    timeout: Duration,
}

impl<T: ToolTransport> HealthChecker<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Invoke `health_check` and parse the payload.
    pub async fn check(&mut self) -> Result<HealthStatus, ProbeError> {
        let payload = self
            .transport
            .invoke("health_check", json!({}), self.timeout)
            .await?;

        let status: HealthStatus = serde_json::from_str(payload.trim())?;
        Ok(status)
    }

    /// Run a check and report it to `out`.
    ///
    /// On success writes the four status lines in fixed order and returns
    /// the status; on any probe error logs the diagnostic, writes the single
    /// unreachable line, and returns `None`. `out` carries only these
    /// contract lines; diagnostics go to the log.
    pub async fn check_and_report<W: Write>(
        &mut self,
        out: &mut W,
    ) -> io::Result<Option<HealthStatus>> {
        match self.check().await {
            Ok(status) => {
                writeln!(out, "Status: {}", status.status)?;
                writeln!(out, "Timestamp: {}", status.timestamp)?;
                writeln!(out, "Service: {}", status.service)?;
                writeln!(out, "Version: {}", status.version)?;
                Ok(Some(status))
            }
            Err(err) => {
                match &err {
                    ProbeError::Timeout(bound) => {
                        warn!("health check timed out after {}s", bound.as_secs());
                    }
                    ProbeError::MalformedResponse(e) => {
                        warn!("failed to parse health response: {e}");
                    }
                    ProbeError::ProbeFailure(msg) => {
                        error!("health check failed: {msg}");
                    }
                }
                writeln!(out, "Server is unreachable")?;
                Ok(None)
            }
        }
    }

    /// Hand the transport back, e.g. for an orderly shutdown.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
