use async_trait::async_trait;
use dashmap::DashMap;
use ride_journal_sdk::{ImageUpload, DEFAULT_IMAGE_REF};

use crate::domain::error::DomainError;
use crate::domain::ports::BlobStore;

/// Process-local blob store, used by tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: DashMap<String, ImageUpload>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.blobs.contains_key(reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let reference = super::new_reference(&upload.content_type)?;
        self.blobs.insert(reference.clone(), upload.clone());
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), DomainError> {
        if reference != DEFAULT_IMAGE_REF {
            self.blobs.remove(reference);
        }
        Ok(())
    }
}
