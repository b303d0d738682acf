#![allow(clippy::unwrap_used, clippy::expect_used)]

//! OpenAI-compatible backend tests against a local mock server.

use crewmark_agent::backends::openai::OpenAiBackend;
use crewmark_agent::backends::LlmBackend;
use crewmark_agent::{LlmProvider, LlmResponse, ModelConfig};
use crewmark_core::Message;
use crewmark_tools::ToolDescriptor;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(uri: &str) -> ModelConfig {
    ModelConfig {
        provider: LlmProvider::DeepSeek,
        model_id: "deepseek-chat".to_string(),
        api_key: "ds-key".to_string(),
        api_base_url: Some(uri.to_string()),
        temperature: 0.7,
        max_tokens: 4096,
        max_turns: 25,
    }
}

fn search_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "search_trends".to_string(),
        description: "Search trends".to_string(),
        parameters_schema: serde_json::json!({
            "type": "object",
            "properties": {"query": {"type": "string"}},
            "required": ["query"]
        }),
    }
}

#[tokio::test]
async fn chat_sends_model_tools_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer ds-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek-chat",
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"content": "done researching"},
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(config_for(&server.uri()));
    let response = backend
        .chat(
            Some("You are a strategist."),
            &[Message::user("research ai tools")],
            &[search_descriptor()],
        )
        .await
        .unwrap();

    assert!(matches!(response, LlmResponse::Done(text) if text == "done researching"));
}

#[tokio::test]
async fn chat_parses_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {
                    "content": "Let me search.",
                    "tool_calls": [{
                        "id": "call_9",
                        "function": {
                            "name": "search_trends",
                            "arguments": "{\"query\": \"fitness apps\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(config_for(&server.uri()));
    let response = backend
        .chat(None, &[Message::user("go")], &[search_descriptor()])
        .await
        .unwrap();

    match response {
        LlmResponse::ToolUse {
            content,
            tool_calls,
        } => {
            assert_eq!(content.as_deref(), Some("Let me search."));
            assert_eq!(tool_calls[0].name, "search_trends");
            assert_eq!(tool_calls[0].arguments["query"], "fitness apps");
        }
        other => panic!("Expected ToolUse, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": {"message": "bad key"}})),
        )
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(config_for(&server.uri()));
    let err = backend
        .chat(None, &[Message::user("go")], &[])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"));
}
