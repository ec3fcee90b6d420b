use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot returned by the `health_check` probe.
///
/// The shape is closed: exactly these four fields, all non-empty. Field
/// order is the wire order. A fresh instance is built per probe call and
/// discarded after reporting; the timestamp is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

impl HealthStatus {
    /// Build a `healthy` snapshot stamped with the current UTC instant.
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            service: service.into(),
            version: version.into(),
        }
    }
}
