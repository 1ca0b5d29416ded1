use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Caller-facing text for every unexpected failure. Details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type SensorResult<T> = Result<T, SensorError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<SensorError> for AppError {
    fn from(err: SensorError) -> Self {
        match err {
            SensorError::Validation(msg) => Self::BadRequest(msg),
            SensorError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<crate::platform::PlatformError> for AppError {
    fn from(err: crate::platform::PlatformError) -> Self {
        match err {
            crate::platform::PlatformError::Cancelled => {
                Self::ServiceUnavailable("Request cancelled".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            Self::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
