use async_trait::async_trait;
use ride_journal_sdk::{Comment, CommentFilter, PageRequest};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub event_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CommentChanges {
    pub content: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Repository trait for Comment persistence operations.
#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Comment>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: CommentFilter,
        page: &PageRequest,
    ) -> Result<Vec<Comment>, DomainError>;

    async fn list_by_event<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_id: i32,
    ) -> Result<Vec<Comment>, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: CommentRecord,
    ) -> Result<Comment, DomainError>;

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: CommentChanges,
    ) -> Result<u64, DomainError>;

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError>;

    /// Comments on any of `event_ids`, plus every comment written by `user_id`.
    async fn delete_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
        user_id: Option<i32>,
    ) -> Result<u64, DomainError>;
}
