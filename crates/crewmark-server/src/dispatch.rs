use crate::protocol::{tool_result, McpToolDef};
use crewmark_core::{CrewmarkError, CrewmarkResult};
use crewmark_crews::{PipelineRunner, DEFAULT_SEO_ARTICLES};
use std::sync::Arc;
use tracing::{error, info};

/// Maps remotely invocable tool names onto pipeline entry points.
///
/// A pipeline failure is caught here and converted into an MCP tool result
/// with `isError` set; only an unknown tool name or missing required
/// parameters surface as a JSON-RPC level error.
pub struct PipelineDispatcher {
    runner: Arc<PipelineRunner>,
}

impl PipelineDispatcher {
    pub fn new(runner: Arc<PipelineRunner>) -> Self {
        Self { runner }
    }

    /// Names of the exposed tools, in listing order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            "daily_content",
            "seo_content",
            "email_sequence",
            "analytics_report",
            "full_pipeline",
        ]
    }

    /// Tool definitions for the `tools/list` response.
    pub fn tool_defs() -> Vec<McpToolDef> {
        vec![
            McpToolDef {
                name: "daily_content".to_string(),
                description: "Run the daily content creation + social media scheduling \
                    pipeline. Researches trends, creates platform-specific posts, and \
                    schedules them."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "niche": {
                            "type": "string",
                            "description": "Target niche/industry (e.g., 'AI tools', 'fitness apps')"
                        },
                    },
                    "required": ["niche"],
                }),
            },
            McpToolDef {
                name: "seo_content".to_string(),
                description: "Run the SEO keyword research + article generation pipeline. \
                    Finds long-tail keywords and creates SEO-optimized articles."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "Topic to create SEO content for"
                        },
                        "num_articles": {
                            "type": "number",
                            "description": "Number of articles to generate (default: 3)",
                            "default": 3
                        },
                    },
                    "required": ["topic"],
                }),
            },
            McpToolDef {
                name: "email_sequence".to_string(),
                description: "Generate a 7-email nurture sequence for a product. Creates \
                    welcome, value, and conversion emails."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "product_name": {
                            "type": "string",
                            "description": "Name of the product/service"
                        },
                        "value_proposition": {
                            "type": "string",
                            "description": "What makes this product valuable"
                        },
                    },
                    "required": ["product_name"],
                }),
            },
            McpToolDef {
                name: "analytics_report".to_string(),
                description: "Run the daily analytics review. Analyzes all channels and \
                    notifies the owner with a summary."
                    .to_string(),
                input_schema: serde_json::json!({"type": "object", "properties": {}}),
            },
            McpToolDef {
                name: "full_pipeline".to_string(),
                description: "Run the FULL marketing pipeline - all 5 agents: content \
                    creation, social media scheduling, SEO, email sequences, and analytics."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "niche": {"type": "string", "description": "Target niche"},
                        "product_name": {"type": "string", "description": "Product name"},
                        "value_proposition": {"type": "string", "description": "Value prop"},
                    },
                    "required": ["niche", "product_name"],
                }),
            },
        ]
    }

    /// Execute a named tool. `Err` means the request itself was invalid
    /// (unknown tool, missing required parameter); a pipeline failure comes
    /// back as `Ok` with an `isError` tool result.
    pub async fn call(
        &self,
        name: &str,
        arguments: &serde_json::Value,
    ) -> CrewmarkResult<serde_json::Value> {
        info!(tool = %name, "Dispatching tool call");

        let outcome = match name {
            "daily_content" => {
                let niche = require_str(arguments, "niche")?;
                self.runner
                    .run_daily_content(niche)
                    .await
                    .map(|r| format!("# Daily Content Pipeline Complete\n\n{r}"))
            }
            "seo_content" => {
                let topic = require_str(arguments, "topic")?;
                let num_articles = arguments["num_articles"]
                    .as_u64()
                    .map(|n| n as u32)
                    .unwrap_or(DEFAULT_SEO_ARTICLES);
                self.runner
                    .run_seo(topic, num_articles)
                    .await
                    .map(|r| format!("# SEO Content Pipeline Complete\n\n{r}"))
            }
            "email_sequence" => {
                let product_name = require_str(arguments, "product_name")?;
                let value_prop = arguments["value_proposition"].as_str().unwrap_or_default();
                self.runner
                    .run_email(product_name, value_prop)
                    .await
                    .map(|r| format!("# Email Sequence Created\n\n{r}"))
            }
            "analytics_report" => self
                .runner
                .run_analytics()
                .await
                .map(|r| format!("# Analytics Report\n\n{r}")),
            "full_pipeline" => {
                let niche = require_str(arguments, "niche")?;
                let product_name = require_str(arguments, "product_name")?;
                let value_prop = arguments["value_proposition"].as_str().unwrap_or_default();
                self.runner
                    .run_full(niche, product_name, value_prop)
                    .await
                    .map(|r| format!("# Full Marketing Pipeline Complete\n\n{r}"))
            }
            other => {
                return Err(CrewmarkError::Server(format!("Unknown tool: {other}")));
            }
        };

        match outcome {
            Ok(text) => Ok(tool_result(text, false)),
            Err(e) => {
                error!(tool = %name, error = %e, "Pipeline failed");
                Ok(tool_result(format!("Error: {e}"), true))
            }
        }
    }
}

fn require_str<'a>(arguments: &'a serde_json::Value, key: &str) -> CrewmarkResult<&'a str> {
    arguments[key]
        .as_str()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CrewmarkError::Server(format!("Missing required parameter: {key}")))
}
