use crate::output::OutputLayout;
use crate::tool::{Tool, ToolDescriptor};
use crewmark_core::{CrewmarkResult, ToolCall, ToolResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Reads the latest saved analytics data.
pub struct ReadAnalyticsTool {
    descriptor: ToolDescriptor,
    layout: Arc<OutputLayout>,
}

impl ReadAnalyticsTool {
    pub fn new(layout: Arc<OutputLayout>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "read_analytics".to_string(),
                description: "Read the latest analytics data from saved reports. \
                    Sources: posts, emails, seo, all."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "source": {
                            "type": "string",
                            "enum": ["posts", "emails", "seo", "all"],
                            "description": "Which channel to read (default: all)"
                        }
                    }
                }),
            },
            layout,
        }
    }
}

#[async_trait]
impl Tool for ReadAnalyticsTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let source = call.arguments["source"].as_str().unwrap_or("all");

        let Some(data) = self.layout.read_latest_analytics().await? else {
            return Ok(ToolResult::success(
                &call.id,
                "No analytics data available yet. Run some campaigns first.",
            ));
        };

        let selected = if source != "all" && data.get(source).is_some() {
            &data[source]
        } else {
            &data
        };

        Ok(ToolResult::success(
            &call.id,
            serde_json::to_string_pretty(selected)?,
        ))
    }
}

/// Saves the daily marketing performance report under `reports/`.
pub struct SaveReportTool {
    descriptor: ToolDescriptor,
    layout: Arc<OutputLayout>,
}

impl SaveReportTool {
    pub fn new(layout: Arc<OutputLayout>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "save_report".to_string(),
                description: "Save the daily marketing performance report.".to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "report": {
                            "type": "string",
                            "description": "The full report in markdown"
                        }
                    },
                    "required": ["report"]
                }),
            },
            layout,
        }
    }
}

#[async_trait]
impl Tool for SaveReportTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> CrewmarkResult<ToolResult> {
        let report = call.arguments["report"].as_str().unwrap_or_default();
        if report.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty report"));
        }

        match self.layout.write_report(report).await {
            Ok(path) => {
                info!(path = %path.display(), "Daily report saved");
                Ok(ToolResult::success(
                    &call.id,
                    format!("Daily report saved to {}", path.display()),
                ))
            }
            Err(e) => Ok(ToolResult::error(
                &call.id,
                format!("Failed to save report: {e}"),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::output::Category;

    #[tokio::test]
    async fn test_read_analytics_without_data() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = ReadAnalyticsTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t1".to_string(),
            name: "read_analytics".to_string(),
            arguments: serde_json::json!({}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(!result.is_error);
        assert!(result.content.contains("No analytics data"));
    }

    #[tokio::test]
    async fn test_read_analytics_selects_source() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Arc::new(OutputLayout::new(tmp.path()));
        let dir = layout.category_dir(Category::Analytics);
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(
            dir.join("latest_report.json"),
            r#"{"posts": {"likes": 10}, "emails": {"opens": 5}}"#,
        )
        .await
        .unwrap();

        let tool = ReadAnalyticsTool::new(layout);
        let call = ToolCall {
            id: "t2".to_string(),
            name: "read_analytics".to_string(),
            arguments: serde_json::json!({"source": "emails"}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.content.contains("opens"));
        assert!(!result.content.contains("likes"));
    }

    #[tokio::test]
    async fn test_save_report_writes_dated_file() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveReportTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t3".to_string(),
            name: "save_report".to_string(),
            arguments: serde_json::json!({"report": "Engagement up 12%."}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(!result.is_error, "Result: {}", result.content);

        let mut entries = tokio::fs::read_dir(tmp.path().join("reports")).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        let name = entry.file_name().into_string().unwrap();
        assert!(name.starts_with("daily-"));
    }

    #[tokio::test]
    async fn test_save_report_rejects_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = SaveReportTool::new(Arc::new(OutputLayout::new(tmp.path())));
        let call = ToolCall {
            id: "t4".to_string(),
            name: "save_report".to_string(),
            arguments: serde_json::json!({"report": ""}),
        };
        let result = tool.execute(call).await.unwrap();
        assert!(result.is_error);
    }
}
