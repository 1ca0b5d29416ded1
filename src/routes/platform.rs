use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::platform::{PlatformOutcome, PlatformQueryParameters, PlatformReading};

/// Proxy a query to the telemetry platform
///
/// The platform's status code is passed through unchanged. The reading is
/// only attached when the platform answered with a success status.
#[utoipa::path(
    get,
    path = "/api/platform/data",
    params(PlatformQueryParameters),
    responses(
        (status = 200, description = "Reading returned by the platform", body = PlatformReading),
        (status = 500, description = "Platform could not be reached or sent an unreadable reply"),
        (status = 503, description = "Request cancelled during shutdown"),
    ),
    tag = "platform"
)]
pub async fn get_platform_data(
    State(state): State<AppState>,
    Query(params): Query<PlatformQueryParameters>,
) -> AppResult<Response> {
    // Cancelled on shutdown, or when axum drops this future on client disconnect
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let outcome = state
        .platform_client
        .fetch_platform_data(&state.config.platform_endpoint, &params, &cancel)
        .await?;

    match outcome {
        PlatformOutcome::Reading { status, reading } => Ok((status, Json(reading)).into_response()),
        PlatformOutcome::Upstream(status) => Ok(status.into_response()),
        PlatformOutcome::Failed => Err(AppError::Internal(
            "Failed to fetch data from external API".to_string(),
        )),
    }
}
