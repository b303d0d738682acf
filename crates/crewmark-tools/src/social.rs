use crate::output::OutputLayout;
use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::config::SocialSettings;
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Queues a post through the Buffer scheduling API.
///
/// Two round trips: list the connected profiles, pick the first whose service
/// matches the requested platform, then create a queued update for it.
/// Publishing mutates third-party state and is never retried here.
pub struct SchedulePostTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    access_token: Option<String>,
    base_url: String,
}

impl SchedulePostTool {
    pub fn new(client: reqwest::Client, settings: &SocialSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "schedule_post".to_string(),
                description: "Schedule a social media post via Buffer. \
                    Platforms: twitter, instagram, linkedin, facebook."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The post text"
                        },
                        "platform": {
                            "type": "string",
                            "description": "Target platform (default: twitter)"
                        }
                    },
                    "required": ["text"]
                }),
            },
            client,
            access_token: settings.buffer_access_token.clone(),
            base_url: settings.buffer_base_url.clone(),
        }
    }
}

#[async_trait]
impl Tool for SchedulePostTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let text = call.arguments["text"].as_str().unwrap_or_default();
        if text.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty post text"));
        }
        let platform = call.arguments["platform"]
            .as_str()
            .unwrap_or("twitter")
            .to_lowercase();

        let Some(token) = &self.access_token else {
            return Ok(ToolResult::error(
                &call.id,
                "Buffer access token not configured. Save the post locally instead.",
            ));
        };

        let profiles_resp = match self
            .client
            .get(format!("{}/1/profiles.json", self.base_url))
            .query(&[("access_token", token.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Buffer API error: {e}"),
                ));
            }
        };

        let profiles: serde_json::Value = match profiles_resp.json().await {
            Ok(v) => v,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Buffer API error: {e}"),
                ));
            }
        };

        let empty = vec![];
        let profile_list = profiles.as_array().unwrap_or(&empty);
        let target = profile_list.iter().find(|p| {
            p["service"]
                .as_str()
                .map(|s| s.to_lowercase().contains(&platform))
                .unwrap_or(false)
        });

        let Some(profile) = target else {
            let available: Vec<&str> = profile_list
                .iter()
                .filter_map(|p| p["service"].as_str())
                .collect();
            return Ok(ToolResult::error(
                &call.id,
                format!("No {platform} profile found in Buffer. Available: {available:?}"),
            ));
        };

        let profile_id = profile["id"].as_str().unwrap_or_default();
        info!(platform = %platform, profile_id = %profile_id, "Queueing Buffer post");

        let resp = match self
            .client
            .post(format!("{}/1/updates/create.json", self.base_url))
            .form(&[
                ("access_token", token.as_str()),
                ("profile_ids[]", profile_id),
                ("text", text),
                ("now", "false"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Buffer API error: {e}"),
                ));
            }
        };

        let result: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Buffer API error: {e}"),
                ));
            }
        };

        if result["success"].as_bool().unwrap_or(false) {
            let update_id = result["updates"][0]["id"].as_str().unwrap_or("unknown");
            Ok(ToolResult::success(
                &call.id,
                format!("Post queued on {platform} via Buffer. ID: {update_id}"),
            ))
        } else {
            let message = result["message"].as_str().unwrap_or("Unknown error");
            Ok(ToolResult::error(
                &call.id,
                format!("Buffer error: {message}"),
            ))
        }
    }
}

/// Saves generated post content under `posts/` for manual review or later
/// scheduling. The fallback when Buffer is not configured.
pub struct SavePostTool {
    descriptor: ToolDescriptor,
    layout: Arc<OutputLayout>,
}

impl SavePostTool {
    pub fn new(layout: Arc<OutputLayout>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "save_post".to_string(),
                description: "Save generated post content to a local file for manual \
                    review or later scheduling. Use this when API access is not available."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "content": {
                            "type": "string",
                            "description": "The post content"
                        },
                        "platform": {
                            "type": "string",
                            "description": "Target platform"
                        },
                        "post_type": {
                            "type": "string",
                            "description": "Post type (default: text)"
                        }
                    },
                    "required": ["content", "platform"]
                }),
            },
            layout,
        }
    }
}

#[async_trait]
impl Tool for SavePostTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let content = call.arguments["content"].as_str().unwrap_or_default();
        let platform = call.arguments["platform"].as_str().unwrap_or_default();
        let post_type = call.arguments["post_type"].as_str().unwrap_or("text");

        if content.is_empty() || platform.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both content and platform are required",
            ));
        }

        match self.layout.write_post(platform, post_type, content).await {
            Ok(path) => {
                info!(path = %path.display(), "Post saved");
                Ok(ToolResult::success(
                    &call.id,
                    format!("Post saved to {}", path.display()),
                ))
            }
            Err(e) => Ok(ToolResult::error(
                &call.id,
                format!("Failed to save post: {e}"),
            )),
        }
    }
}
