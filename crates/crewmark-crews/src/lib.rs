//! Crew compositions and pipeline entry points.
//!
//! Agents and tasks are declarative records; a [`crew::Crew`] ties an ordered
//! task list to the agents it references and executes the tasks sequentially,
//! handing each task the outputs of its predecessors. The five pipeline
//! variants (content, SEO, email, analytics, full) live in [`pipelines`].

/// Declarative agent definitions.
pub mod agent;
/// Crew composition and sequential execution.
pub mod crew;
/// The five pipeline entry points.
pub mod pipelines;
/// Task records and constructors.
pub mod task;

pub use agent::AgentSpec;
pub use crew::{BackendFactory, Crew, CrewRuntime};
pub use pipelines::{PipelineRunner, DEFAULT_SEO_ARTICLES};
pub use task::Task;
