use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CREATED_MESSAGE: &str = "Resource created successfully.";
pub const UPDATED_MESSAGE: &str = "Resource updated successfully.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    /// Id of the new sensor
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
