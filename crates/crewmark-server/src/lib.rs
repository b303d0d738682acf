//! MCP server exposing the marketing pipelines as remotely invocable tools.
//!
//! Transport is SSE: clients open a long-lived stream at `/sse`, receive a
//! session-scoped endpoint URL, and post JSON-RPC requests there; responses
//! are delivered back over the stream. A pipeline failure becomes an error
//! payload on the stream, never a crash. `/health` reports liveness.

/// Tool-name to pipeline dispatch.
pub mod dispatch;
/// JSON-RPC / MCP message types.
pub mod protocol;
/// The axum router.
pub mod server;
/// SSE session tracking.
pub mod session;

pub use dispatch::PipelineDispatcher;
pub use server::{AppState, McpServer};
pub use session::SessionManager;
