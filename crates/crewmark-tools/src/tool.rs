use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata describing a tool binding's interface.
///
/// The parameters schema is a JSON Schema object handed verbatim to the LLM
/// provider as a function-calling declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters_schema: serde_json::Value,
}

/// Trait that all tool bindings implement.
///
/// Upstream API rejections are reported as `Ok(ToolResult::error(...))` so the
/// invoking agent sees them in-band; `Err` is reserved for failures that should
/// abort the surrounding task.
#[async_trait]
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult>;
}
