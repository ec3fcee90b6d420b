//! Client side: the transport seam and the check-and-report workflow.

pub mod checker;
pub mod error;
pub mod transport;

pub use checker::HealthChecker;
pub use error::ProbeError;
pub use transport::{StdioTransport, ToolTransport};
