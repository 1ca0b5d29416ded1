use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::common::AppState;
use crate::domain::{SensorInput, SensorView};
use crate::error::{AppError, AppResult};

use super::types::{
    CreatedResponse, MessageResponse, CREATED_MESSAGE, NOT_FOUND_MESSAGE, UPDATED_MESSAGE,
};

/// List all sensors
#[utoipa::path(
    get,
    path = "/api/sensors",
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorView>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn list_sensors(State(state): State<AppState>) -> AppResult<Json<Vec<SensorView>>> {
    let sensors = state
        .sensors
        .list_sensors()
        .await?
        .ok_or_else(|| AppError::Internal("Sensor store returned no result set".to_string()))?;

    Ok(Json(sensors))
}

/// Get a sensor by ID
#[utoipa::path(
    get,
    path = "/api/sensors/{sensor_id}",
    params(
        ("sensor_id" = Uuid, Path, description = "Sensor UUID"),
    ),
    responses(
        (status = 200, description = "Sensor retrieved successfully", body = SensorView),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn get_sensor(
    State(state): State<AppState>,
    Path(sensor_id): Path<Uuid>,
) -> AppResult<Json<SensorView>> {
    let sensor = state
        .sensors
        .get_sensor(sensor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    Ok(Json(sensor))
}

/// Create a sensor
#[utoipa::path(
    post,
    path = "/api/sensors",
    request_body = SensorInput,
    responses(
        (status = 201, description = "Sensor created", body = CreatedResponse),
        (status = 400, description = "UpperWarning is lower than LowerWarning"),
    ),
    tag = "sensors"
)]
pub async fn create_sensor(
    State(state): State<AppState>,
    Json(input): Json<SensorInput>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.sensors.create_sensor(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE.to_string(),
            data: id.to_string(),
        }),
    ))
}

/// Update a sensor's name, location and thresholds
#[utoipa::path(
    put,
    path = "/api/sensors/{sensor_id}",
    params(
        ("sensor_id" = Uuid, Path, description = "Sensor UUID"),
    ),
    request_body = SensorInput,
    responses(
        (status = 200, description = "Sensor updated", body = MessageResponse),
        (status = 400, description = "UpperWarning is lower than LowerWarning"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn update_sensor(
    State(state): State<AppState>,
    Path(sensor_id): Path<Uuid>,
    Json(input): Json<SensorInput>,
) -> AppResult<Json<MessageResponse>> {
    if !state.sensors.update_sensor(sensor_id, input).await? {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    Ok(Json(MessageResponse {
        message: UPDATED_MESSAGE.to_string(),
    }))
}

/// Delete a sensor
#[utoipa::path(
    delete,
    path = "/api/sensors/{sensor_id}",
    params(
        ("sensor_id" = Uuid, Path, description = "Sensor UUID"),
    ),
    responses(
        (status = 204, description = "Sensor deleted"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn delete_sensor(
    State(state): State<AppState>,
    Path(sensor_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.sensors.delete_sensor(sensor_id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
