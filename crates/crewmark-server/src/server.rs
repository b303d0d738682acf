use crate::dispatch::PipelineDispatcher;
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PROTOCOL_VERSION,
};
use crate::session::SessionManager;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use crewmark_crews::PipelineRunner;
use futures_util::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pub dispatcher: PipelineDispatcher,
    pub sessions: SessionManager,
}

/// The MCP server over SSE.
///
/// `GET /sse` opens the event stream; the first event is an `endpoint` event
/// carrying the session-scoped message URL. `POST /messages` accepts JSON-RPC
/// requests, pushes each response onto the session's stream, and returns
/// `202 Accepted`. `GET /health` is the liveness check.
pub struct McpServer;

impl McpServer {
    pub fn build(runner: Arc<PipelineRunner>) -> Router {
        let state = Arc::new(AppState {
            dispatcher: PipelineDispatcher::new(runner),
            sessions: SessionManager::new(),
        });

        Router::new()
            .route("/sse", get(sse_handler))
            .route("/messages", post(messages_handler))
            .route("/health", get(health_handler))
            .layer(tower_http::cors::CorsLayer::permissive())
            .with_state(state)
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "crewmark",
        "tools": PipelineDispatcher::tool_names(),
    }))
}

async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl futures_util::Stream<Item = Result<Event, Infallible>>> {
    let (session_id, rx) = state.sessions.open().await;

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?session_id={session_id}"));

    let stream = futures_util::stream::once(async move { Ok::<_, Infallible>(endpoint) })
        .chain(ReceiverStream::new(rx).map(Ok));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct MessagesQuery {
    session_id: Uuid,
}

async fn messages_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessagesQuery>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    if !state.sessions.contains(query.session_id).await {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "Unknown session. Connect to /sse first."
            })),
        )
            .into_response();
    }

    // Dispatch in the background so slow pipeline runs do not hold the POST
    // open; the response arrives on the session's SSE stream.
    let session_id = query.session_id;
    tokio::spawn(async move {
        if let Some(response) = handle_request(&state, request).await {
            let payload = match serde_json::to_string(&response) {
                Ok(json) => json,
                Err(e) => {
                    debug!(error = %e, "Failed to serialize response");
                    return;
                }
            };
            state
                .sessions
                .send(session_id, Event::default().event("message").data(payload))
                .await;
        }
    });

    StatusCode::ACCEPTED.into_response()
}

/// Process one JSON-RPC request. Notifications produce no response.
async fn handle_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let Some(id) = request.id else {
        debug!(method = %request.method, "Notification received");
        return None;
    };

    info!(method = %request.method, "MCP request");

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::result(
            id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {"listChanged": false}
                },
                "serverInfo": {
                    "name": "crewmark",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),

        "tools/list" => JsonRpcResponse::result(
            id,
            serde_json::json!({"tools": PipelineDispatcher::tool_defs()}),
        ),

        "tools/call" => {
            let name = request.params["name"].as_str().unwrap_or_default();
            let arguments = request.params.get("arguments").cloned().unwrap_or_default();

            match state.dispatcher.call(name, &arguments).await {
                Ok(result) => JsonRpcResponse::result(id, result),
                Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
            }
        }

        "ping" => JsonRpcResponse::result(id, serde_json::json!({})),

        other => JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        ),
    };

    Some(response)
}
