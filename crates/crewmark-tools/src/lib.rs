//! Tool bindings for the crewmark marketing agents.
//!
//! Each binding is a thin wrapper over one external SaaS API (search, social
//! scheduling, email marketing, messaging) or over the local artifact output
//! tree. Bindings marshal a small set of primitive parameters into a request
//! and report upstream rejections in-band as tool errors the invoking agent
//! can react to.
//!
//! # Main entry points
//!
//! - [`register_marketing_tools()`] — Register the full marketing tool set.
//! - [`ToolRegistry`] — Lookup and execution of registered tools.
//! - [`OutputLayout`] — The category-based artifact directory tree.

/// Analytics read/report tools.
pub mod analytics;
/// Email campaign and draft tools.
pub mod email;
/// Owner notification tool.
pub mod notify;
/// Artifact output tree.
pub mod output;
/// Tool registry.
pub mod registry;
/// Search tools.
pub mod search;
/// SEO keyword research and article tools.
pub mod seo;
/// Social scheduling and post-saving tools.
pub mod social;
/// Tool trait and descriptor.
pub mod tool;

pub use analytics::{ReadAnalyticsTool, SaveReportTool};
pub use email::{SaveEmailDraftTool, SendCampaignTool};
pub use notify::NotifyOwnerTool;
pub use output::{Category, OutputLayout};
pub use registry::ToolRegistry;
pub use search::{TrendSearchTool, WebSearchTool};
pub use seo::{KeywordResearchTool, SaveArticleTool};
pub use social::{SavePostTool, SchedulePostTool};
pub use tool::{Tool, ToolDescriptor};

use crewmark_core::config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Register all marketing tool bindings into the given registry.
///
/// One shared HTTP client is used across bindings; its timeout is the only
/// retry/timeout policy the bindings carry.
pub fn register_marketing_tools(
    registry: &mut ToolRegistry,
    config: &Config,
    layout: Arc<OutputLayout>,
) -> crewmark_core::CrewmarkResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| crewmark_core::CrewmarkError::Config(format!("HTTP client: {e}")))?;

    registry.register(Arc::new(TrendSearchTool::new(client.clone(), &config.search)));
    registry.register(Arc::new(WebSearchTool::new(client.clone(), &config.search)));
    registry.register(Arc::new(SchedulePostTool::new(client.clone(), &config.social)));
    registry.register(Arc::new(SavePostTool::new(layout.clone())));
    registry.register(Arc::new(KeywordResearchTool::new(
        client.clone(),
        &config.search,
    )));
    registry.register(Arc::new(SaveArticleTool::new(layout.clone())));
    registry.register(Arc::new(SendCampaignTool::new(client.clone(), &config.email)));
    registry.register(Arc::new(SaveEmailDraftTool::new(layout.clone())));
    registry.register(Arc::new(NotifyOwnerTool::new(client, &config.telegram)));
    registry.register(Arc::new(ReadAnalyticsTool::new(layout.clone())));
    registry.register(Arc::new(SaveReportTool::new(layout)));

    Ok(())
}
