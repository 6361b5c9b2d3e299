//! Blob store adapters.

mod fs_blob_store;
mod memory;

pub use fs_blob_store::FsBlobStore;
pub use memory::InMemoryBlobStore;

use crate::domain::error::DomainError;

/// File extension for an accepted image content type.
///
/// # Errors
/// `Validation` when the content type is not an image type.
pub fn extension_for(content_type: &str) -> Result<&'static str, DomainError> {
    let ext = match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        other if other.starts_with("image/") => "img",
        _ => {
            return Err(DomainError::validation(
                "contentType",
                format!("'{content_type}' is not an image content type"),
            ));
        }
    };
    Ok(ext)
}

/// Generate a fresh blob reference for an accepted upload.
pub(crate) fn new_reference(content_type: &str) -> Result<String, DomainError> {
    let ext = extension_for(content_type)?;
    Ok(format!("{}.{ext}", uuid::Uuid::new_v4()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_extensions() {
        assert_eq!(extension_for("image/png").unwrap(), "png");
        assert_eq!(extension_for("IMAGE/JPEG").unwrap(), "jpg");
        assert_eq!(extension_for("image/x-icon").unwrap(), "img");
    }

    #[test]
    fn non_images_are_rejected() {
        assert!(matches!(
            extension_for("application/pdf"),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn references_are_unique() {
        let a = new_reference("image/png").unwrap();
        let b = new_reference("image/png").unwrap();
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }
}
