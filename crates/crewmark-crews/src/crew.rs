use crate::agent::AgentSpec;
use crate::task::Task;
use crewmark_agent::backends::LlmBackend;
use crewmark_agent::{AgentRunner, LlmClient, ModelConfig};
use crewmark_core::{CrewmarkError, CrewmarkResult};
use crewmark_tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

/// Produces a backend for a given model config. Tests install a factory that
/// returns scripted backends; production runs use the real provider client.
pub type BackendFactory = Arc<dyn Fn(ModelConfig) -> Box<dyn LlmBackend> + Send + Sync>;

/// Shared state a crew needs to execute: the tool registry and the base model
/// configuration. Constructed once per process and reused across runs.
pub struct CrewRuntime {
    tools: Arc<ToolRegistry>,
    model: ModelConfig,
    backend_factory: Option<BackendFactory>,
}

impl CrewRuntime {
    pub fn new(tools: Arc<ToolRegistry>, model: ModelConfig) -> Self {
        Self {
            tools,
            model,
            backend_factory: None,
        }
    }

    /// Substitute the LLM layer (test seam).
    pub fn with_backend_factory(mut self, factory: BackendFactory) -> Self {
        self.backend_factory = Some(factory);
        self
    }

    fn client_for(&self, config: ModelConfig) -> LlmClient {
        match &self.backend_factory {
            Some(factory) => LlmClient::from_backend(factory(config)),
            None => LlmClient::new(config),
        }
    }
}

/// A crew: ordered tasks plus the agents they reference.
///
/// One crew represents one pipeline variant. Execution is sequential; each
/// task receives the outputs of all prior tasks as context. A failing task
/// aborts the crew.
pub struct Crew {
    name: String,
    agents: Vec<AgentSpec>,
    tasks: Vec<Task>,
}

impl Crew {
    /// Build a crew, validating that every task is assigned to a member agent.
    pub fn new(
        name: impl Into<String>,
        agents: Vec<AgentSpec>,
        tasks: Vec<Task>,
    ) -> CrewmarkResult<Self> {
        let name = name.into();
        if tasks.is_empty() {
            return Err(CrewmarkError::Crew(format!("Crew '{name}' has no tasks")));
        }
        for task in &tasks {
            if !agents.iter().any(|a| a.role == task.agent_role) {
                return Err(CrewmarkError::Crew(format!(
                    "Crew '{}': task assigned to '{}', which is not a member agent",
                    name, task.agent_role
                )));
            }
        }
        Ok(Self {
            name,
            agents,
            tasks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roles of the member agents, in declaration order.
    pub fn agent_roles(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.role.as_str()).collect()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Execute all tasks in order. Returns the final task's output.
    pub async fn kickoff(&self, runtime: &CrewRuntime) -> CrewmarkResult<String> {
        info!(crew = %self.name, tasks = self.tasks.len(), "Crew kickoff");

        let mut prior_outputs: Vec<(String, String)> = Vec::new();
        let mut final_output = String::new();

        for (index, task) in self.tasks.iter().enumerate() {
            let spec = self
                .agents
                .iter()
                .find(|a| a.role == task.agent_role)
                .ok_or_else(|| {
                    // Unreachable after construction-time validation.
                    CrewmarkError::Crew(format!("No agent for role '{}'", task.agent_role))
                })?;

            info!(
                crew = %self.name,
                task = index + 1,
                agent = %spec.role,
                "Running task"
            );

            let config = runtime.model.clone().with_temperature(spec.temperature);
            let client = runtime.client_for(config);
            let runner = AgentRunner::with_client(
                client,
                runtime.tools.clone(),
                spec.tools.clone(),
                spec.max_turns,
            );

            let input = build_task_input(task, &prior_outputs);
            let output = runner
                .run(&spec.system_prompt(), &input)
                .await
                .map_err(|e| {
                    CrewmarkError::Crew(format!(
                        "Crew '{}': task {} ('{}') failed: {}",
                        self.name,
                        index + 1,
                        spec.role,
                        e
                    ))
                })?;

            prior_outputs.push((spec.role.clone(), output.clone()));
            final_output = output;
        }

        info!(crew = %self.name, "Crew completed");
        Ok(final_output)
    }
}

fn build_task_input(task: &Task, prior_outputs: &[(String, String)]) -> String {
    let mut input = format!(
        "{}\n\nExpected output: {}",
        task.description, task.expected_output
    );

    if !prior_outputs.is_empty() {
        input.push_str("\n\nContext from previous tasks:");
        for (role, output) in prior_outputs {
            input.push_str(&format!("\n\n## {role}\n{output}"));
        }
    }

    input
}
