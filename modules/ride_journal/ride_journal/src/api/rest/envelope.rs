//! Response envelopes shared by every handler.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope: `{"result": 200, "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    #[schema(example = 200)]
    pub result: u16,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            result: StatusCode::OK.as_u16(),
            data,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.result).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Failure envelope: `{"result": 404, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = 404)]
    pub result: u16,
    pub error: String,
}

/// Deleted row count returned by delete handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub deleted: u64,
}
