//! Conversational endpoints
//!
//! Both endpoints run the assistant fallback chain and always answer 200
//! with a normalized `ChatResponse` - upstream failures never surface as
//! HTTP errors here, and neither does a malformed request body.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use whaletrace_core::ChatResponse;

use crate::state::AppState;
use crate::types::{AssistantRequest, ChatRequest};

/// Reply when the request body cannot be parsed. Still HTTP 200: the
/// conversational surface never returns an error status.
const MALFORMED_BODY_REPLY: &str = "I couldn't read that request. Send a JSON body like \
{\"query\": \"show recent transactions\"}.";

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/assistant", post(assistant))
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/chat - Run the assistant over a free-text query
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "Assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
    ),
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let query = match payload {
        Ok(Json(req)) => req.query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed chat body, serving guidance reply");
            return Json(ChatResponse::assistant(MALFORMED_BODY_REPLY));
        }
    };
    Json(state.assistant.respond_to_query(&query).await)
}

/// POST /api/v1/assistant - Dashboard-shaped alias for /chat
#[utoipa::path(
    post,
    path = "/api/v1/assistant",
    tag = "Assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
    ),
)]
pub async fn assistant(
    State(state): State<AppState>,
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let message = match payload {
        Ok(Json(req)) => req.message,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed assistant body, serving guidance reply");
            return Json(ChatResponse::assistant(MALFORMED_BODY_REPLY));
        }
    };
    Json(state.assistant.respond_to_query(&message).await)
}
