use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Filters forwarded to the platform API as query parameters.
///
/// Serialized in field order; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlatformQueryParameters {
    /// Stream to read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<Uuid>,
    /// Start of the time range (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    /// End of the time range (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Single reading returned by `GET <platform endpoint>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformReading {
    pub stream_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub stored_at: DateTime<Utc>,
    pub value: f64,
}

/// What the platform answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformOutcome {
    /// 2xx with a well-formed reading
    Reading {
        status: StatusCode,
        reading: PlatformReading,
    },
    /// The platform's own status, passed through untouched
    Upstream(StatusCode),
    /// No usable answer: transport error, timeout or malformed body
    Failed,
}

impl PlatformOutcome {
    /// Status to report to the caller. `Failed` is the only case where the
    /// status was not produced by the platform itself.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Reading { status, .. } | Self::Upstream(status) => *status,
            Self::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn reading(&self) -> Option<&PlatformReading> {
        match self {
            Self::Reading { reading, .. } => Some(reading),
            Self::Upstream(_) | Self::Failed => None,
        }
    }
}
