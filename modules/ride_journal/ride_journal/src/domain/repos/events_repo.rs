use async_trait::async_trait;
use ride_journal_sdk::{Event, EventFilter, EventType, PageRequest};
use sea_orm::ConnectionTrait;
use time::{Date, OffsetDateTime};

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct EventRecord {
    pub vehicle_id: i32,
    pub user_id: i32,
    pub title: String,
    pub detail: Option<String>,
    pub event_type: EventType,
    pub date: Date,
    pub odometer: Option<i32>,
    pub published: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct EventChanges {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub event_type: Option<EventType>,
    pub date: Option<Date>,
    pub odometer: Option<i32>,
    pub published: Option<bool>,
    pub updated_at: OffsetDateTime,
}

/// Repository trait for Event persistence operations.
#[async_trait]
pub trait EventsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Event>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: EventFilter,
        page: &PageRequest,
    ) -> Result<Vec<Event>, DomainError>;

    /// Every event of one vehicle, newest first.
    async fn list_by_vehicle<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        vehicle_id: i32,
    ) -> Result<Vec<Event>, DomainError>;

    async fn exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError>;

    /// Ids of events posted against any of `vehicle_ids` or authored by `user_id`.
    async fn ids_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        vehicle_ids: &[i32],
        user_id: Option<i32>,
    ) -> Result<Vec<i32>, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: EventRecord,
    ) -> Result<Event, DomainError>;

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: EventChanges,
    ) -> Result<u64, DomainError>;

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError>;

    async fn delete_by_ids<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        ids: &[i32],
    ) -> Result<u64, DomainError>;
}
