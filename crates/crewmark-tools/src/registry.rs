use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::{CrewmarkError, CrewmarkResult, ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Central registry for all available tool bindings.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.descriptor().name.clone();
        info!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn list_descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Descriptors for a named subset, in the order the names are given.
    /// Names with no registered tool are skipped.
    pub fn descriptors_for(&self, names: &[String]) -> Vec<ToolDescriptor> {
        names
            .iter()
            .filter_map(|n| self.tools.get(n).map(|t| t.descriptor().clone()))
            .collect()
    }

    /// Execute a tool call. An unknown tool name is an infrastructure error
    /// and aborts the calling task.
    pub async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| CrewmarkError::Tool(format!("Unknown tool: {}", call.name)))?;

        tool.execute(call).await
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool {
        descriptor: ToolDescriptor,
    }

    impl EchoTool {
        fn new(name: &str) -> Self {
            Self {
                descriptor: ToolDescriptor {
                    name: name.to_string(),
                    description: "Echo the input back".to_string(),
                    parameters_schema: serde_json::json!({"type": "object", "properties": {}}),
                },
            }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
            Ok(ToolResult::success(&call.id, call.arguments.to_string()))
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool::new("echo")));
        assert_eq!(registry.tool_count(), 1);

        let call = ToolCall {
            id: "c1".to_string(),
            name: "echo".to_string(),
            arguments: serde_json::json!({"q": "hi"}),
        };
        let result = registry.execute(call).await.unwrap();
        assert!(!result.is_error);
        assert!(result.content.contains("hi"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let call = ToolCall {
            id: "c1".to_string(),
            name: "missing".to_string(),
            arguments: serde_json::json!({}),
        };
        let err = registry.execute(call).await.unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[test]
    fn test_descriptors_for_subset_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool::new("a")));
        registry.register(Arc::new(EchoTool::new("b")));
        registry.register(Arc::new(EchoTool::new("c")));

        let names = vec!["c".to_string(), "a".to_string(), "nope".to_string()];
        let descriptors = registry.descriptors_for(&names);
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "c");
        assert_eq!(descriptors[1].name, "a");
    }
}
