//! Output ports the domain depends on.

use async_trait::async_trait;
use ride_journal_sdk::{ImageUpload, SecurityContext};

use crate::domain::error::{DomainError, IdentityError};

/// Opaque binary storage for uploaded images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the payload and return the reference to persist on the row.
    async fn put(&self, upload: &ImageUpload) -> Result<String, DomainError>;

    /// Remove a stored payload. Deleting an unknown reference is not an error.
    async fn delete(&self, reference: &str) -> Result<(), DomainError>;
}

/// Turns a bearer credential into the caller's identity.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, bearer: Option<&str>) -> Result<SecurityContext, IdentityError>;
}
