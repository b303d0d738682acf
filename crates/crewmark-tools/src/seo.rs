use crate::output::OutputLayout;
use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::config::SearchSettings;
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Long-tail keyword research from free sources: Google autocomplete plus
/// Serper related searches and "people also ask" questions.
pub struct KeywordResearchTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    serper_api_key: Option<String>,
    serper_base_url: String,
    suggest_base_url: String,
}

impl KeywordResearchTool {
    pub fn new(client: reqwest::Client, settings: &SearchSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "keyword_research".to_string(),
                description: "Find relevant long-tail keywords for a topic using \
                    search suggestions and related searches. Free alternative to \
                    paid keyword tools."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "The topic to research keywords for"
                        }
                    },
                    "required": ["topic"]
                }),
            },
            client,
            serper_api_key: settings.serper_api_key.clone(),
            serper_base_url: settings.serper_base_url.clone(),
            suggest_base_url: settings.suggest_base_url.clone(),
        }
    }

    async fn autocomplete(&self, topic: &str) -> Vec<String> {
        let resp = self
            .client
            .get(format!("{}/complete/search", self.suggest_base_url))
            .query(&[("client", "firefox"), ("q", topic)])
            .send()
            .await;

        let Ok(resp) = resp else { return vec![] };
        if !resp.status().is_success() {
            return vec![];
        }
        let Ok(data) = resp.json::<serde_json::Value>().await else {
            return vec![];
        };

        // Response shape: [query, [suggestion, ...], ...]
        data.get(1)
            .and_then(|s| s.as_array())
            .map(|suggestions| {
                suggestions
                    .iter()
                    .filter_map(|s| s.as_str().map(str::to_string))
                    .take(10)
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn related_searches(&self, topic: &str) -> Vec<String> {
        let Some(api_key) = &self.serper_api_key else {
            return vec![];
        };

        let resp = self
            .client
            .post(format!("{}/search", self.serper_base_url))
            .header("X-API-KEY", api_key)
            .json(&serde_json::json!({"q": topic, "num": 5}))
            .send()
            .await;

        let Ok(resp) = resp else { return vec![] };
        if !resp.status().is_success() {
            return vec![];
        }
        let Ok(data) = resp.json::<serde_json::Value>().await else {
            return vec![];
        };

        let mut keywords = Vec::new();
        if let Some(related) = data["relatedSearches"].as_array() {
            keywords.extend(
                related
                    .iter()
                    .filter_map(|item| item["query"].as_str().map(str::to_string)),
            );
        }
        if let Some(questions) = data["peopleAlsoAsk"].as_array() {
            keywords.extend(
                questions
                    .iter()
                    .filter_map(|item| item["question"].as_str().map(str::to_string)),
            );
        }
        keywords
    }
}

#[async_trait]
impl Tool for KeywordResearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let topic = call.arguments["topic"].as_str().unwrap_or_default();
        if topic.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty topic"));
        }

        info!(topic = %topic, "Keyword research");

        let mut keywords = self.autocomplete(topic).await;
        keywords.extend(self.related_searches(topic).await);

        let unique = dedupe_preserving_order(keywords);
        if unique.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                format!("No keywords found for '{topic}'"),
            ));
        }

        let listing: Vec<String> = unique.iter().map(|k| format!("- {k}")).collect();
        Ok(ToolResult::success(
            &call.id,
            format!(
                "Found {} keywords for '{}':\n{}",
                unique.len(),
                topic,
                listing.join("\n")
            ),
        ))
    }
}

fn dedupe_preserving_order(keywords: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .into_iter()
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

/// Saves an SEO-optimized article under `articles/` with YAML front matter.
pub struct SaveArticleTool {
    descriptor: ToolDescriptor,
    layout: Arc<OutputLayout>,
}

impl SaveArticleTool {
    pub fn new(layout: Arc<OutputLayout>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "save_article".to_string(),
                description: "Save an SEO-optimized article to the output directory."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Article title"
                        },
                        "content": {
                            "type": "string",
                            "description": "Full article body in markdown"
                        },
                        "keywords": {
                            "type": "string",
                            "description": "Comma-separated target keywords"
                        }
                    },
                    "required": ["title", "content"]
                }),
            },
            layout,
        }
    }
}

#[async_trait]
impl Tool for SaveArticleTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let title = call.arguments["title"].as_str().unwrap_or_default();
        let content = call.arguments["content"].as_str().unwrap_or_default();
        let keywords = call.arguments["keywords"].as_str().unwrap_or_default();

        if title.is_empty() || content.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both title and content are required",
            ));
        }

        match self.layout.write_article(title, keywords, content).await {
            Ok(path) => {
                info!(path = %path.display(), "Article saved");
                Ok(ToolResult::success(
                    &call.id,
                    format!("Article saved to {}", path.display()),
                ))
            }
            Err(e) => Ok(ToolResult::error(
                &call.id,
                format!("Failed to save article: {e}"),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_preserving_order() {
        let input = vec![
            "ai tools".to_string(),
            "best ai tools".to_string(),
            "ai tools".to_string(),
            String::new(),
            "ai tools 2026".to_string(),
        ];
        let out = dedupe_preserving_order(input);
        assert_eq!(out, vec!["ai tools", "best ai tools", "ai tools 2026"]);
    }

    #[tokio::test]
    async fn test_save_article_requires_title() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveArticleTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t1".to_string(),
            name: "save_article".to_string(),
            arguments: serde_json::json!({"content": "body"}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_save_article_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveArticleTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t2".to_string(),
            name: "save_article".to_string(),
            arguments: serde_json::json!({
                "title": "Programmatic SEO Guide",
                "content": "Long-tail keywords win.",
                "keywords": "programmatic seo"
            }),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(!result.is_error, "Result: {}", result.content);
        assert!(result.content.contains("Article saved to"));
    }
}
