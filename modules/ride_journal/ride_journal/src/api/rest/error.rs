use http::StatusCode;
use ride_journal_sdk::RideJournalError;

use super::envelope::ErrorEnvelope;
use crate::domain::error::IdentityError;

/// A handler failure already mapped to its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            result: self.status.as_u16(),
            error: self.message.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Map SDK errors to statuses. Internal failures keep an opaque message.
impl From<RideJournalError> for ApiError {
    fn from(e: RideJournalError) -> Self {
        let status = match &e {
            RideJournalError::AuthorizationDenied { .. } => StatusCode::UNAUTHORIZED,
            RideJournalError::NotFound { .. } => StatusCode::NOT_FOUND,
            RideJournalError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RideJournalError::Conflict { .. } => StatusCode::CONFLICT,
            RideJournalError::Internal => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                );
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        tracing::debug!(error = %e, "Rejected bearer credential");
        let message = match e {
            IdentityError::Missing => "Authentication required",
            IdentityError::Invalid(_) => "Invalid bearer credential",
        };
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}
