//! Liveness check.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// `GET /health`: `ok` when the database answers, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.users.count().await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
