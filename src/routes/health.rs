use axum::{extract::State, http::StatusCode};

use crate::common::AppState;

/// Health check endpoint
///
/// Returns 200 OK while the service accepts traffic and 503 once shutdown
/// has started.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Service is shutting down"),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    if state.shutdown.is_cancelled() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
