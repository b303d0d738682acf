use crate::config::ModelConfig;
use crate::context::ContextWindow;
use crate::llm::{LlmClient, LlmResponse};
use crewmark_core::{CrewmarkError, CrewmarkResult, Message, Role, ToolResult};
use crewmark_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{error, info, warn};

const MAX_CONTEXT_MESSAGES: usize = 100;

/// The agent runner: orchestrates the agentic loop for one task.
/// Prompt → LLM → ToolCall → Execute → Backfill → Repeat.
///
/// The runner only exposes the agent's bound tools to the LLM; a call to any
/// other registered tool is answered with an in-band error rather than
/// executed. Registry-level failures (unknown tool) abort the run.
pub struct AgentRunner {
    llm: LlmClient,
    tools: Arc<ToolRegistry>,
    bound_tools: Vec<String>,
    max_turns: u32,
}

impl AgentRunner {
    pub fn new(config: ModelConfig, tools: Arc<ToolRegistry>, bound_tools: Vec<String>) -> Self {
        let max_turns = config.max_turns;
        Self {
            llm: LlmClient::new(config),
            tools,
            bound_tools,
            max_turns,
        }
    }

    /// Build a runner around an already-constructed client (test seam).
    pub fn with_client(
        llm: LlmClient,
        tools: Arc<ToolRegistry>,
        bound_tools: Vec<String>,
        max_turns: u32,
    ) -> Self {
        Self {
            llm,
            tools,
            bound_tools,
            max_turns,
        }
    }

    /// Run the agentic loop. Returns the final assistant response.
    pub async fn run(&self, system_prompt: &str, task_input: &str) -> CrewmarkResult<String> {
        let mut context = ContextWindow::new(MAX_CONTEXT_MESSAGES);
        context.set_system_prompt(system_prompt);
        context.push(Message::user(task_input));

        let tool_descriptors = self.tools.descriptors_for(&self.bound_tools);

        info!(tools = tool_descriptors.len(), "Starting agentic loop");

        for turn in 0..self.max_turns {
            info!(turn = turn, "Agentic loop turn");

            let response = self
                .llm
                .chat(context.system_prompt(), context.messages(), &tool_descriptors)
                .await?;

            match response {
                LlmResponse::Done(text) => {
                    info!(turns = turn + 1, "Agentic loop completed");
                    return Ok(text);
                }

                LlmResponse::Text(text) => {
                    context.push(Message::assistant(text));
                }

                LlmResponse::ToolUse {
                    content,
                    tool_calls,
                } => {
                    if let Some(text) = &content {
                        context.push(Message::assistant(text));
                    }

                    for call in tool_calls {
                        info!(tool = %call.name, call_id = %call.id, "Executing tool call");

                        let tool_result = if self.bound_tools.contains(&call.name) {
                            self.tools.execute(call.clone()).await.map_err(|e| {
                                error!(error = %e, tool = %call.name, "Tool execution failed");
                                e
                            })?
                        } else {
                            ToolResult::error(
                                &call.id,
                                format!("Tool '{}' is not available to this agent", call.name),
                            )
                        };

                        let result_content = serde_json::json!({
                            "type": "tool_result",
                            "tool_use_id": tool_result.call_id,
                            "content": tool_result.content,
                            "is_error": tool_result.is_error,
                        });
                        context.push(Message::new(Role::User, result_content.to_string()));
                    }
                }
            }
        }

        warn!(max_turns = self.max_turns, "Agentic loop reached max turns");

        Err(CrewmarkError::Agent(format!(
            "Agentic loop exceeded maximum of {} turns",
            self.max_turns
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::backends::LlmBackend;
    use crewmark_core::ToolCall;
    use crewmark_tools::{Tool, ToolDescriptor};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that replays a fixed script of responses.
    struct ScriptedBackend {
        script: Mutex<Vec<LlmResponse>>,
    }

    impl ScriptedBackend {
        fn new(mut responses: Vec<LlmResponse>) -> Self {
            responses.reverse();
            Self {
                script: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn chat(
            &self,
            _system_prompt: Option<&str>,
            _messages: &[Message],
            _tools: &[ToolDescriptor],
        ) -> CrewmarkResult<LlmResponse> {
            self.script
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| CrewmarkError::Agent("script exhausted".to_string()))
        }
    }

    struct RecordingTool {
        descriptor: ToolDescriptor,
        calls: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    impl RecordingTool {
        fn new(name: &str, calls: Arc<Mutex<Vec<serde_json::Value>>>) -> Self {
            Self {
                descriptor: ToolDescriptor {
                    name: name.to_string(),
                    description: "records calls".to_string(),
                    parameters_schema: serde_json::json!({"type": "object", "properties": {}}),
                },
                calls,
            }
        }
    }

    #[async_trait]
    impl Tool for RecordingTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
            self.calls.lock().unwrap().push(call.arguments.clone());
            Ok(ToolResult::success(&call.id, "recorded"))
        }
    }

    fn runner_with(
        responses: Vec<LlmResponse>,
        registry: ToolRegistry,
        bound: Vec<String>,
    ) -> AgentRunner {
        AgentRunner::with_client(
            LlmClient::from_backend(Box::new(ScriptedBackend::new(responses))),
            Arc::new(registry),
            bound,
            5,
        )
    }

    #[tokio::test]
    async fn test_done_returns_final_text() {
        let runner = runner_with(
            vec![LlmResponse::Done("final answer".to_string())],
            ToolRegistry::new(),
            vec![],
        );
        let result = runner.run("system", "task").await.unwrap();
        assert_eq!(result, "final answer");
    }

    #[tokio::test]
    async fn test_tool_calls_execute_then_finish() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(RecordingTool::new("save_post", calls.clone())));

        let runner = runner_with(
            vec![
                LlmResponse::ToolUse {
                    content: None,
                    tool_calls: vec![ToolCall {
                        id: "c1".to_string(),
                        name: "save_post".to_string(),
                        arguments: serde_json::json!({"content": "post", "platform": "twitter"}),
                    }],
                },
                LlmResponse::Done("saved".to_string()),
            ],
            registry,
            vec!["save_post".to_string()],
        );

        let result = runner.run("system", "task").await.unwrap();
        assert_eq!(result, "saved");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unbound_tool_is_rejected_in_band() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(RecordingTool::new("save_post", calls.clone())));

        let runner = runner_with(
            vec![
                LlmResponse::ToolUse {
                    content: None,
                    tool_calls: vec![ToolCall {
                        id: "c1".to_string(),
                        name: "save_post".to_string(),
                        arguments: serde_json::json!({}),
                    }],
                },
                LlmResponse::Done("ok".to_string()),
            ],
            registry,
            // The tool exists in the registry but is not bound to this agent.
            vec!["web_search".to_string()],
        );

        let result = runner.run("system", "task").await.unwrap();
        assert_eq!(result, "ok");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_aborts_run() {
        let runner = runner_with(
            vec![LlmResponse::ToolUse {
                content: None,
                tool_calls: vec![ToolCall {
                    id: "c1".to_string(),
                    name: "ghost_tool".to_string(),
                    arguments: serde_json::json!({}),
                }],
            }],
            ToolRegistry::new(),
            vec!["ghost_tool".to_string()],
        );

        let err = runner.run("system", "task").await.unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_max_turns_exceeded_is_an_error() {
        let responses = (0..5)
            .map(|i| LlmResponse::Text(format!("thinking {i}")))
            .collect();
        let runner = runner_with(responses, ToolRegistry::new(), vec![]);

        let err = runner.run("system", "task").await.unwrap_err();
        assert!(err.to_string().contains("exceeded maximum"));
    }
}
