mod chat;
mod health;
mod metrics;

pub use chat::chat_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::state::AppState;

// Shared by the binary and the integration tests
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/metrics", get(metrics_handler))
}
