use super::AppState;
use super::types::{ChatBody, ChatResponse, EditBody, EditResponse, ErrorBody};
use crate::assistant::{ChatRequest, EditRequest};
use crate::error::AssistantError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

fn failure(kind: &str, err: &AssistantError) -> Response {
    let detail = err.to_string();
    tracing::warn!(kind, detail = %detail, "request failed");
    (StatusCode::BAD_GATEWAY, Json(ErrorBody { detail })).into_response()
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let agent = if state.assistant.is_available() {
        "ready"
    } else {
        "unavailable"
    };
    Json(serde_json::json!({
        "status": "ok",
        "agent": agent,
    }))
}

/// POST /edit
pub(super) async fn handle_edit(
    State(state): State<AppState>,
    Json(body): Json<EditBody>,
) -> Response {
    let request = EditRequest::from(body);
    match state.assistant.edit(&request).await {
        Ok(outcome) => (StatusCode::OK, Json(EditResponse::from(outcome))).into_response(),
        Err(err) => failure("edit", &err),
    }
}

/// POST /chat
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Response {
    let request = ChatRequest::from(body);
    match state.assistant.chat(&request).await {
        Ok(outcome) => (StatusCode::OK, Json(ChatResponse::from(outcome))).into_response(),
        Err(err) => failure("chat", &err),
    }
}
