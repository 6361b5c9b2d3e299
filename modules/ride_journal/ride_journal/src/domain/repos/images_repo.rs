use async_trait::async_trait;
use ride_journal_sdk::{Image, ImageFilter, PageRequest};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub event_id: i32,
    pub reference: String,
    pub content_type: String,
    pub created_at: OffsetDateTime,
}

/// Repository trait for Image persistence operations.
///
/// Images carry no owner column: ownership is that of the parent event.
#[async_trait]
pub trait ImagesRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Image>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: ImageFilter,
        page: &PageRequest,
    ) -> Result<Vec<Image>, DomainError>;

    async fn list_by_event<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_id: i32,
    ) -> Result<Vec<Image>, DomainError>;

    /// Blob references of every image attached to `event_ids`.
    async fn references_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
    ) -> Result<Vec<String>, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: ImageRecord,
    ) -> Result<Image, DomainError>;

    /// Delete image `id` only if its event is owned by `owner_id`.
    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError>;

    async fn delete_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
    ) -> Result<u64, DomainError>;
}
