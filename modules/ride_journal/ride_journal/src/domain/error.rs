use ride_journal_sdk::RideJournalError;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("caller is not the owner of {entity} {id}")]
    AuthorizationDenied { entity: &'static str, id: i32 },

    #[error("Referenced row is missing: {message}")]
    ReferentialIntegrity { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Blob store error: {message}")]
    Blob { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub fn authorization_denied(entity: &'static str, id: i32) -> Self {
        Self::AuthorizationDenied { entity, id }
    }

    pub fn referential_integrity(message: impl Into<String>) -> Self {
        Self::ReferentialIntegrity {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn blob(message: impl Into<String>) -> Self {
        Self::Blob {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// True for failures the caller cannot fix by changing the request.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::ReferentialIntegrity { .. } | Self::Blob { .. } | Self::Database { .. }
        )
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for RideJournalError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { entity, id } => RideJournalError::not_found(entity, id),
            DomainError::AuthorizationDenied { entity, .. } => {
                RideJournalError::authorization_denied(entity)
            }
            DomainError::Validation { field, message } => {
                RideJournalError::validation(format!("{field}: {message}"))
            }
            DomainError::Conflict { message } => RideJournalError::conflict(message),
            DomainError::ReferentialIntegrity { .. }
            | DomainError::Blob { .. }
            | DomainError::Database { .. } => RideJournalError::internal(),
        }
    }
}

/// Failure to turn a bearer credential into a caller identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("no bearer credential supplied")]
    Missing,

    #[error("invalid bearer credential: {0}")]
    Invalid(String),
}
