use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::config::TelegramSettings;
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use tracing::info;

/// Sends a notification message to the owner via a Telegram bot.
pub struct NotifyOwnerTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    bot_token: Option<String>,
    chat_id: Option<String>,
    base_url: String,
}

impl NotifyOwnerTool {
    pub fn new(client: reqwest::Client, settings: &TelegramSettings) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "notify_owner".to_string(),
                description: "Send a notification message to the owner via Telegram. \
                    Use this for daily reports and important alerts."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The message to send (markdown supported)"
                        }
                    },
                    "required": ["message"]
                }),
            },
            client,
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

#[async_trait]
impl Tool for NotifyOwnerTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let message = call.arguments["message"].as_str().unwrap_or_default();
        if message.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty message"));
        }

        let (Some(token), Some(chat_id)) = (&self.bot_token, &self.chat_id) else {
            return Ok(ToolResult::error(
                &call.id,
                "Telegram not configured. Log the message instead.",
            ));
        };

        info!("Sending Telegram notification");

        let resp = match self
            .client
            .post(format!("{}/bot{}/sendMessage", self.base_url, token))
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": message,
                "parse_mode": "Markdown",
            }))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Telegram error: {e}"),
                ));
            }
        };

        if resp.status().is_success() {
            Ok(ToolResult::success(
                &call.id,
                "Telegram notification sent",
            ))
        } else {
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(200).collect();
            Ok(ToolResult::error(
                &call.id,
                format!("Telegram error: {detail}"),
            ))
        }
    }
}
