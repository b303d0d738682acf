//! LLM provider abstraction and the agentic loop.
//!
//! The loop is Prompt → LLM → ToolCall → Execute → Backfill → Repeat, bounded
//! by a per-agent turn budget. Providers are abstracted behind [`backends::LlmBackend`];
//! the one production backend speaks the OpenAI chat-completions wire format,
//! which covers DeepSeek, OpenAI, and OpenRouter.

/// Provider selection and model configuration.
pub mod config;
/// Bounded conversation context.
pub mod context;
/// Provider backends.
pub mod backends;
/// Backend-dispatching LLM client.
pub mod llm;
/// The agentic loop.
pub mod runner;

pub use config::{LlmProvider, ModelConfig};
pub use context::ContextWindow;
pub use llm::{LlmClient, LlmResponse};
pub use runner::AgentRunner;
