//! Health-check MCP server and client.
//!
//! The server half exposes `health_check` and `add` tools over JSON-RPC 2.0
//! stdio transport, compatible with any MCP-aware agent. The client half
//! spawns the server as a child process, invokes the probe with a bounded
//! wait, and reports the outcome to a console stream.

pub mod client;
pub mod config;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod status;
