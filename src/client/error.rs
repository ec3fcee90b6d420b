use std::time::Duration;

/// Ways a probe invocation can fail.
///
/// Every kind is recovered locally by the checker: the caller gets back
/// either a status or an absent result plus a logged diagnostic, never an
/// unhandled failure.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probe did not respond within the bounded wait.
    #[error("probe did not respond within {0:?}")]
    Timeout(Duration),

    /// The probe responded, but the payload was not the expected shape.
    #[error("malformed probe response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Any other invocation error: spawn or pipe I/O, a JSON-RPC error
    /// response, or a tool result flagged as an error.
    #[error("probe failure: {0}")]
    ProbeFailure(String),
}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        Self::ProbeFailure(e.to_string())
    }
}
