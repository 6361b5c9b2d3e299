use async_trait::async_trait;
use ride_journal_sdk::{Like, LikeFilter, PageRequest};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy)]
pub struct LikeRecord {
    pub user_id: i32,
    pub event_id: i32,
    pub created_at: OffsetDateTime,
}

/// Repository trait for Like persistence operations.
///
/// `(user_id, event_id)` is unique in the store.
#[async_trait]
pub trait LikesRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Like>, DomainError>;

    async fn find_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
        event_id: i32,
    ) -> Result<Option<Like>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: LikeFilter,
        page: &PageRequest,
    ) -> Result<Vec<Like>, DomainError>;

    async fn list_by_event<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_id: i32,
    ) -> Result<Vec<Like>, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: LikeRecord,
    ) -> Result<Like, DomainError>;

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError>;

    /// Likes on any of `event_ids`, plus every like given by `user_id`.
    async fn delete_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
        user_id: Option<i32>,
    ) -> Result<u64, DomainError>;
}
