use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::config::SearchSettings;
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use tracing::info;

const SNIPPET_CHARS: usize = 300;

/// Trend search binding over the Tavily API.
pub struct TrendSearchTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl TrendSearchTool {
    pub fn new(client: reqwest::Client, settings: &SearchSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "search_trends".to_string(),
                description: "Search for trending topics and current news. \
                    Use this to find what's trending in your niche right now."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                }),
            },
            client,
            api_key: settings.tavily_api_key.clone(),
            base_url: settings.tavily_base_url.clone(),
        }
    }
}

#[async_trait]
impl Tool for TrendSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let query = call.arguments["query"].as_str().unwrap_or_default();
        if query.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty query"));
        }

        let Some(api_key) = &self.api_key else {
            return Ok(ToolResult::error(
                &call.id,
                "Tavily API key not configured",
            ));
        };

        info!(query = %query, "Trend search");

        let body = serde_json::json!({
            "api_key": api_key,
            "query": query,
            "search_depth": "advanced",
            "max_results": 10,
            "include_raw_content": false,
        });

        let resp = match self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(&call.id, format!("Search error: {e}")));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            return Ok(ToolResult::error(
                &call.id,
                format!("Tavily API error: {status}"),
            ));
        }

        let data: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                return Ok(ToolResult::error(&call.id, format!("Search error: {e}")));
            }
        };

        let hits = data["results"].as_array().cloned().unwrap_or_default();
        let blocks: Vec<String> = hits
            .iter()
            .map(|r| {
                format!(
                    "**{}**\n{}\nURL: {}\n",
                    r["title"].as_str().unwrap_or("N/A"),
                    snippet(r["content"].as_str().unwrap_or_default()),
                    r["url"].as_str().unwrap_or_default(),
                )
            })
            .collect();

        if blocks.is_empty() {
            Ok(ToolResult::success(&call.id, "No results found."))
        } else {
            Ok(ToolResult::success(&call.id, blocks.join("\n---\n")))
        }
    }
}

/// Broad web search binding over the Serper API. Good for forums, Reddit
/// threads, and finding what real people are discussing.
pub struct WebSearchTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl WebSearchTool {
    pub fn new(client: reqwest::Client, settings: &SearchSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "web_search".to_string(),
                description: "Search Google for forums, Reddit threads, and broad web \
                    content. Great for finding what real people are discussing."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                }),
            },
            client,
            api_key: settings.serper_api_key.clone(),
            base_url: settings.serper_base_url.clone(),
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let query = call.arguments["query"].as_str().unwrap_or_default();
        if query.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty query"));
        }

        let Some(api_key) = &self.api_key else {
            return Ok(ToolResult::error(
                &call.id,
                "Serper API key not configured",
            ));
        };

        info!(query = %query, "Web search");

        let resp = match self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", api_key)
            .json(&serde_json::json!({"q": query, "num": 10}))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(&call.id, format!("Search error: {e}")));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            return Ok(ToolResult::error(
                &call.id,
                format!("Serper API error: {status}"),
            ));
        }

        let data: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                return Ok(ToolResult::error(&call.id, format!("Search error: {e}")));
            }
        };

        let hits = data["organic"].as_array().cloned().unwrap_or_default();
        let blocks: Vec<String> = hits
            .iter()
            .map(|item| {
                format!(
                    "**{}**\n{}\nURL: {}\n",
                    item["title"].as_str().unwrap_or("N/A"),
                    item["snippet"].as_str().unwrap_or_default(),
                    item["link"].as_str().unwrap_or_default(),
                )
            })
            .collect();

        if blocks.is_empty() {
            Ok(ToolResult::success(&call.id, "No results found."))
        } else {
            Ok(ToolResult::success(&call.id, blocks.join("\n---\n")))
        }
    }
}

fn snippet(content: &str) -> String {
    content.chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn settings_without_keys() -> SearchSettings {
        SearchSettings {
            tavily_api_key: None,
            tavily_base_url: "http://127.0.0.1:1".to_string(),
            serper_api_key: None,
            serper_base_url: "http://127.0.0.1:1".to_string(),
            suggest_base_url: "http://127.0.0.1:1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_trend_search_requires_key() {
        let tool = TrendSearchTool::new(reqwest::Client::new(), &settings_without_keys());
        let call = ToolCall {
            id: "t1".to_string(),
            name: "search_trends".to_string(),
            arguments: serde_json::json!({"query": "ai tools"}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("not configured"));
    }

    #[tokio::test]
    async fn test_web_search_empty_query() {
        let tool = WebSearchTool::new(reqwest::Client::new(), &settings_without_keys());
        let call = ToolCall {
            id: "t2".to_string(),
            name: "web_search".to_string(),
            arguments: serde_json::json!({}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let long = "é".repeat(400);
        assert_eq!(snippet(&long).chars().count(), SNIPPET_CHARS);
    }
}
