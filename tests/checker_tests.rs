//! Checker workflow tests against a scripted transport.
//!
//! The console stream is captured in a byte sink so the report contract can
//! be asserted byte-for-byte.

use std::time::Duration;

use async_trait::async_trait;
use mcp_health_server::client::{HealthChecker, ProbeError, ToolTransport};
use serde_json::Value;

const BOUND: Duration = Duration::from_secs(5);

/// What the scripted transport should do on invoke.
enum Script {
    Respond(&'static str),
    RespondAfter(Duration, &'static str),
    Fail(&'static str),
}

struct MockTransport {
    script: Script,
    invoked: Vec<String>,
}

impl MockTransport {
    fn new(script: Script) -> Self {
        Self {
            script,
            invoked: Vec::new(),
        }
    }
}

#[async_trait]
impl ToolTransport for MockTransport {
    async fn invoke(
        &mut self,
        tool: &str,
        _arguments: Value,
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        self.invoked.push(tool.to_string());
        match &self.script {
            Script::Respond(text) => Ok(text.to_string()),
            Script::RespondAfter(delay, text) => {
                match tokio::time::timeout(timeout, tokio::time::sleep(*delay)).await {
                    Ok(()) => Ok(text.to_string()),
                    Err(_) => Err(ProbeError::Timeout(timeout)),
                }
            }
            Script::Fail(msg) => Err(ProbeError::ProbeFailure(msg.to_string())),
        }
    }
}

const HEALTHY_PAYLOAD: &str = r#"{"status":"healthy","timestamp":"2026-08-07T12:00:00.000000Z","service":"MCP Server","version":"1.0.0"}"#;

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_prints_four_lines_in_fixed_order() {
    let transport = MockTransport::new(Script::Respond(HEALTHY_PAYLOAD));
    let mut checker = HealthChecker::new(transport, BOUND);

    let mut out = Vec::new();
    let status = checker.check_and_report(&mut out).await.unwrap();

    assert!(status.is_some());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Status: healthy\n\
         Timestamp: 2026-08-07T12:00:00.000000Z\n\
         Service: MCP Server\n\
         Version: 1.0.0\n"
    );

    assert_eq!(checker.into_transport().invoked, vec!["health_check"]);
}

#[tokio::test]
async fn check_parses_the_payload() {
    let transport = MockTransport::new(Script::Respond(HEALTHY_PAYLOAD));
    let mut checker = HealthChecker::new(transport, BOUND);

    let status = checker.check().await.unwrap();
    assert_eq!(status.status, "healthy");
    assert_eq!(status.timestamp, "2026-08-07T12:00:00.000000Z");
    assert_eq!(status.service, "MCP Server");
    assert_eq!(status.version, "1.0.0");
}

#[tokio::test(start_paused = true)]
async fn slow_probe_within_bound_still_succeeds() {
    let transport =
        MockTransport::new(Script::RespondAfter(Duration::from_secs(1), HEALTHY_PAYLOAD));
    let mut checker = HealthChecker::new(transport, BOUND);

    assert!(checker.check().await.is_ok());
}

// ---------------------------------------------------------------------------
// Failure taxonomy
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn probe_slower_than_bound_times_out() {
    let transport =
        MockTransport::new(Script::RespondAfter(Duration::from_secs(10), HEALTHY_PAYLOAD));
    let mut checker = HealthChecker::new(transport, BOUND);

    let err = checker.check().await.unwrap_err();
    assert!(matches!(err, ProbeError::Timeout(b) if b == BOUND));
}

#[tokio::test(start_paused = true)]
async fn timeout_reports_unreachable_without_status_lines() {
    let transport =
        MockTransport::new(Script::RespondAfter(Duration::from_secs(10), HEALTHY_PAYLOAD));
    let mut checker = HealthChecker::new(transport, BOUND);

    let mut out = Vec::new();
    let status = checker.check_and_report(&mut out).await.unwrap();

    assert!(status.is_none());
    assert_eq!(String::from_utf8(out).unwrap(), "Server is unreachable\n");
}

#[tokio::test]
async fn non_json_payload_is_malformed() {
    let transport = MockTransport::new(Script::Respond("definitely not json"));
    let mut checker = HealthChecker::new(transport, BOUND);

    let err = checker.check().await.unwrap_err();
    assert!(matches!(err, ProbeError::MalformedResponse(_)));

    let mut out = Vec::new();
    let status = checker.check_and_report(&mut out).await.unwrap();
    assert!(status.is_none());
    assert_eq!(String::from_utf8(out).unwrap(), "Server is unreachable\n");
}

#[tokio::test]
async fn missing_field_is_malformed() {
    let transport = MockTransport::new(Script::Respond(
        r#"{"status":"healthy","timestamp":"2026-08-07T12:00:00.000000Z","service":"MCP Server"}"#,
    ));
    let mut checker = HealthChecker::new(transport, BOUND);

    let err = checker.check().await.unwrap_err();
    assert!(matches!(err, ProbeError::MalformedResponse(_)));
}

#[tokio::test]
async fn unexpected_extra_field_is_malformed() {
    let transport = MockTransport::new(Script::Respond(
        r#"{"status":"healthy","timestamp":"2026-08-07T12:00:00.000000Z","service":"MCP Server","version":"1.0.0","uptime":12}"#,
    ));
    let mut checker = HealthChecker::new(transport, BOUND);

    let err = checker.check().await.unwrap_err();
    assert!(matches!(err, ProbeError::MalformedResponse(_)));
}

#[tokio::test]
async fn probe_failure_reports_unreachable() {
    let transport = MockTransport::new(Script::Fail("connection refused"));
    let mut checker = HealthChecker::new(transport, BOUND);

    let mut out = Vec::new();
    let status = checker.check_and_report(&mut out).await.unwrap();

    assert!(status.is_none());
    assert_eq!(String::from_utf8(out).unwrap(), "Server is unreachable\n");
}
