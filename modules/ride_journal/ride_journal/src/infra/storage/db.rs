//! Database error conversion helpers.

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Classify a store failure into a `DomainError`.
///
/// Constraint violations keep their meaning so callers can react to them;
/// everything else is an opaque database error.
pub fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            DomainError::referential_integrity(detail)
        }
        Some(SqlErr::UniqueConstraintViolation(detail)) => DomainError::conflict(detail),
        _ => DomainError::database(e.to_string()),
    }
}

/// Convert any displayable error into a `DomainError::Database`.
pub fn db_msg(e: impl std::fmt::Display) -> DomainError {
    DomainError::database(e.to_string())
}
