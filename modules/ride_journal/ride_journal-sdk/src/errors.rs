//! Public error types for the `ride_journal` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the `RideJournalClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RideJournalError {
    /// The addressed resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    /// The caller does not own the resource it tried to change.
    #[error("not authorized to modify {entity}")]
    AuthorizationDenied { entity: &'static str },

    /// A unique value is already taken.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl RideJournalError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub fn authorization_denied(entity: &'static str) -> Self {
        Self::AuthorizationDenied { entity }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
