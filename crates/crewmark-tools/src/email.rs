use crate::output::OutputLayout;
use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::config::EmailSettings;
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Creates an email campaign through the MailerLite API.
///
/// Without a group id the campaign targets all subscribers. Campaign creation
/// mutates third-party state and is never retried here.
pub struct SendCampaignTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SendCampaignTool {
    pub fn new(client: reqwest::Client, settings: &EmailSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "send_campaign".to_string(),
                description: "Send an email campaign via MailerLite. If group_id is \
                    not provided, sends to all subscribers."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "subject": {
                            "type": "string",
                            "description": "Email subject line"
                        },
                        "content": {
                            "type": "string",
                            "description": "Email body"
                        },
                        "group_id": {
                            "type": "string",
                            "description": "Optional subscriber group to target"
                        }
                    },
                    "required": ["subject", "content"]
                }),
            },
            client,
            api_key: settings.mailerlite_api_key.clone(),
            base_url: settings.mailerlite_base_url.clone(),
        }
    }
}

#[async_trait]
impl Tool for SendCampaignTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let subject = call.arguments["subject"].as_str().unwrap_or_default();
        let content = call.arguments["content"].as_str().unwrap_or_default();
        if subject.is_empty() || content.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both subject and content are required",
            ));
        }

        let Some(api_key) = &self.api_key else {
            return Ok(ToolResult::error(
                &call.id,
                "MailerLite API key not configured. Save the email as a draft instead.",
            ));
        };

        let mut campaign = serde_json::json!({
            "name": format!("Auto Campaign - {}", Utc::now().format("%Y-%m-%d %H:%M")),
            "type": "regular",
            "emails": [{
                "subject": subject,
                "from_name": "Crewmark",
                "content": content,
            }],
        });

        if let Some(group_id) = call.arguments["group_id"].as_str() {
            campaign["groups"] = serde_json::json!([group_id]);
        }

        info!(subject = %subject, "Creating MailerLite campaign");

        let resp = match self
            .client
            .post(format!("{}/api/campaigns", self.base_url))
            .bearer_auth(api_key)
            .json(&campaign)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(&call.id, format!("Email error: {e}")));
            }
        };

        let status = resp.status();
        if status.is_success() {
            Ok(ToolResult::success(
                &call.id,
                format!("Email campaign created: {subject}"),
            ))
        } else {
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(200).collect();
            Ok(ToolResult::error(
                &call.id,
                format!("MailerLite error: {status} - {detail}"),
            ))
        }
    }
}

/// Saves an email draft under `emails/` for review before sending.
pub struct SaveEmailDraftTool {
    descriptor: ToolDescriptor,
    layout: Arc<OutputLayout>,
}

impl SaveEmailDraftTool {
    pub fn new(layout: Arc<OutputLayout>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "save_email_draft".to_string(),
                description: "Save an email draft locally for review before sending."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "subject": {
                            "type": "string",
                            "description": "Email subject line"
                        },
                        "content": {
                            "type": "string",
                            "description": "Email body"
                        },
                        "sequence_position": {
                            "type": "number",
                            "description": "Position in the sequence (default: 1)"
                        }
                    },
                    "required": ["subject", "content"]
                }),
            },
            layout,
        }
    }
}

#[async_trait]
impl Tool for SaveEmailDraftTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let subject = call.arguments["subject"].as_str().unwrap_or_default();
        let content = call.arguments["content"].as_str().unwrap_or_default();
        let position = call.arguments["sequence_position"].as_u64().unwrap_or(1) as u32;

        if subject.is_empty() || content.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both subject and content are required",
            ));
        }

        match self
            .layout
            .write_email_draft(subject, position, content)
            .await
        {
            Ok(path) => {
                info!(path = %path.display(), position = position, "Email draft saved");
                Ok(ToolResult::success(
                    &call.id,
                    format!("Email draft saved to {}", path.display()),
                ))
            }
            Err(e) => Ok(ToolResult::error(
                &call.id,
                format!("Failed to save email draft: {e}"),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn settings_without_key() -> EmailSettings {
        EmailSettings {
            mailerlite_api_key: None,
            mailerlite_base_url: "http://127.0.0.1:1".to_string(),
            welcome_delay_hours: 0,
            nurture_interval_days: 2,
            max_sequence_length: 7,
        }
    }

    #[tokio::test]
    async fn test_send_campaign_requires_key() {
        let tool = SendCampaignTool::new(reqwest::Client::new(), &settings_without_key());
        let call = ToolCall {
            id: "t1".to_string(),
            name: "send_campaign".to_string(),
            arguments: serde_json::json!({"subject": "Hello", "content": "World"}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("not configured"));
    }

    #[tokio::test]
    async fn test_save_email_draft_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveEmailDraftTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t2".to_string(),
            name: "save_email_draft".to_string(),
            arguments: serde_json::json!({
                "subject": "Welcome to MarketBot",
                "content": "Thanks for signing up.",
                "sequence_position": 1
            }),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(!result.is_error, "Result: {}", result.content);

        let mut entries = tokio::fs::read_dir(tmp.path().join("emails")).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        let body = tokio::fs::read_to_string(entry.path()).await.unwrap();
        assert!(body.contains("**Subject:** Welcome to MarketBot"));
    }

    #[tokio::test]
    async fn test_save_email_draft_requires_subject() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveEmailDraftTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t3".to_string(),
            name: "save_email_draft".to_string(),
            arguments: serde_json::json!({"content": "no subject"}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
    }
}
