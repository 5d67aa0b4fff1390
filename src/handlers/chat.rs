use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{
    RATE_LIMITED_TOTAL, RATE_LIMIT_CLIENTS, REQUEST_LATENCY, REQUEST_TOTAL,
    UPSTREAM_FAILURES_TOTAL,
};
use crate::models::{ChatRequest, ChatResponse, normalize_messages};
use crate::state::AppState;

// Scripted copy shown by the widget whenever we can't (or won't) answer
const RATE_LIMITED_TEXT: &str = "You've sent too many messages. Please wait a minute before trying again, or call us at (435) 256-6391 for immediate assistance!";
const FALLBACK_TEXT: &str = "I apologize, but I'm having trouble responding right now. Please call us at (435) 256-6391 for immediate assistance!";

// Best-effort client identity for rate limiting. Forwarded-for is
// spoofable in most topologies; clients without either header all share
// the "unknown" bucket.
fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        // forwarded-for can be a list; the client is the leftmost entry
        .map(|value| value.split(',').next().unwrap_or(value).trim())
        .filter(|value| !value.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn scripted(status: StatusCode, text: &str) -> (StatusCode, Json<ChatResponse>) {
    (
        status,
        Json(ChatResponse {
            text: text.to_string(),
        }),
    )
}

// POST /api/chat
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    REQUEST_TOTAL.inc();

    let client = client_id(&headers);

    // Throttling is an expected condition, not an error
    if !state.rate_limiter.check(&client) {
        RATE_LIMITED_TOTAL.inc();
        return scripted(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_TEXT);
    }
    RATE_LIMIT_CLIENTS.set(state.rate_limiter.tracked_clients() as f64);

    if payload.messages.is_empty() {
        return scripted(StatusCode::BAD_REQUEST, FALLBACK_TEXT);
    }

    let system = if payload.system_context.trim().is_empty() {
        None
    } else {
        Some(payload.system_context.clone())
    };
    let messages = normalize_messages(&payload.messages);

    let start_time = Instant::now();

    match state.upstream.complete(system, messages).await {
        Ok(text) => {
            REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
            (StatusCode::OK, Json(ChatResponse { text }))
        }
        Err(err) => {
            // Full detail stays in the server log; the caller only ever
            // sees the scripted fallback
            UPSTREAM_FAILURES_TOTAL.inc();
            tracing::error!(client = %client, error = %err, "chat completion failed");
            scripted(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_TEXT)
        }
    }
}
