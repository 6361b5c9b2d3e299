use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ride_journal_sdk::{ImageUpload, DEFAULT_IMAGE_REF};

use crate::domain::error::DomainError;
use crate::domain::ports::BlobStore;

/// Stores each upload as `<root>/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open (and create if needed) the blob directory.
    ///
    /// # Errors
    /// `Blob` when the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            DomainError::blob(format!("cannot create {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> Result<PathBuf, DomainError> {
        let well_formed = !reference.is_empty()
            && !reference.starts_with('.')
            && reference
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !well_formed {
            return Err(DomainError::blob(format!(
                "malformed blob reference '{reference}'"
            )));
        }
        Ok(self.root.join(reference))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let reference = super::new_reference(&upload.content_type)?;
        let path = self.path_for(&reference)?;
        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(|e| DomainError::blob(format!("write {}: {e}", path.display())))?;
        tracing::debug!(%reference, bytes = upload.data.len(), "stored blob");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), DomainError> {
        if reference == DEFAULT_IMAGE_REF {
            return Ok(());
        }
        let path = self.path_for(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(%reference, "removed blob");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::blob(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png() -> ImageUpload {
        ImageUpload {
            content_type: "image/png".to_owned(),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn put_writes_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).await.unwrap();

        let reference = store.put(&png()).await.unwrap();

        let bytes = tokio::fs::read(dir.path().join(&reference)).await.unwrap();
        assert_eq!(bytes, png().data);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).await.unwrap();
        let reference = store.put(&png()).await.unwrap();

        store.delete(&reference).await.unwrap();
        store.delete(&reference).await.unwrap();
        store.delete(DEFAULT_IMAGE_REF).await.unwrap();

        assert!(!dir.path().join(&reference).exists());
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path().join("blobs")).await.unwrap();

        let err = store.delete("../escape.png").await.unwrap_err();
        assert!(matches!(err, DomainError::Blob { .. }));
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).await.unwrap();
        let upload = ImageUpload {
            content_type: "text/plain".to_owned(),
            data: b"hello".to_vec(),
        };

        let err = store.put(&upload).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
