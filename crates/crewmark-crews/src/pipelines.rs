//! Pipeline entry points.
//!
//! Each entry point is a pure selection function: it builds the crew
//! composition for one pipeline variant and runs it to completion. No entry
//! point defines its own concurrency or retry policy; a failing task aborts
//! the pipeline and the error surfaces to the caller.

use crate::agent::{
    analytics_strategist, content_strategist, email_specialist, seo_specialist,
    social_media_manager,
};
use crate::crew::{BackendFactory, Crew, CrewRuntime};
use crate::task::{analytics_task, content_task, email_task, seo_task, social_task};
use crewmark_agent::ModelConfig;
use crewmark_core::config::Config;
use crewmark_core::CrewmarkResult;
use crewmark_tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

/// Default article count for the SEO pipeline.
pub const DEFAULT_SEO_ARTICLES: u32 = 3;

/// Runs the named pipelines over a shared runtime.
pub struct PipelineRunner {
    runtime: CrewRuntime,
    config: Config,
}

impl PipelineRunner {
    pub fn new(config: Config, tools: Arc<ToolRegistry>) -> Self {
        let model = ModelConfig::from_settings(&config.llm);
        Self {
            runtime: CrewRuntime::new(tools, model),
            config,
        }
    }

    /// Substitute the LLM layer for every crew this runner builds (test seam).
    pub fn with_backend_factory(mut self, factory: BackendFactory) -> Self {
        self.runtime = self.runtime.with_backend_factory(factory);
        self
    }

    /// Daily content creation + scheduling.
    pub async fn run_daily_content(&self, niche: &str) -> CrewmarkResult<String> {
        info!(niche = %niche, "Running daily content pipeline");
        let crew = Crew::new(
            "daily_content",
            vec![content_strategist(), social_media_manager()],
            vec![
                content_task(niche, None),
                social_task(&self.config.schedule),
            ],
        )?;
        crew.kickoff(&self.runtime).await
    }

    /// SEO keyword research + article generation.
    pub async fn run_seo(&self, topic: &str, num_articles: u32) -> CrewmarkResult<String> {
        info!(topic = %topic, num_articles = num_articles, "Running SEO pipeline");
        let crew = Crew::new(
            "seo_content",
            vec![seo_specialist()],
            vec![seo_task(topic, num_articles, &self.config.seo)],
        )?;
        crew.kickoff(&self.runtime).await
    }

    /// Email nurture sequence generation.
    pub async fn run_email(
        &self,
        product_name: &str,
        value_proposition: &str,
    ) -> CrewmarkResult<String> {
        info!(product = %product_name, "Running email sequence pipeline");
        let crew = Crew::new(
            "email_sequence",
            vec![email_specialist()],
            vec![email_task(product_name, value_proposition)],
        )?;
        crew.kickoff(&self.runtime).await
    }

    /// Daily analytics review.
    pub async fn run_analytics(&self) -> CrewmarkResult<String> {
        info!("Running analytics pipeline");
        let crew = Crew::new(
            "analytics_report",
            vec![analytics_strategist()],
            vec![analytics_task()],
        )?;
        crew.kickoff(&self.runtime).await
    }

    /// The complete pipeline: all five agents in sequence.
    pub async fn run_full(
        &self,
        niche: &str,
        product_name: &str,
        value_proposition: &str,
    ) -> CrewmarkResult<String> {
        info!(niche = %niche, product = %product_name, "Running full marketing pipeline");
        let crew = Crew::new(
            "full_pipeline",
            vec![
                content_strategist(),
                social_media_manager(),
                seo_specialist(),
                email_specialist(),
                analytics_strategist(),
            ],
            vec![
                content_task(niche, None),
                social_task(&self.config.schedule),
                seo_task(niche, DEFAULT_SEO_ARTICLES, &self.config.seo),
                email_task(product_name, value_proposition),
                analytics_task(),
            ],
        )?;
        crew.kickoff(&self.runtime).await
    }
}
