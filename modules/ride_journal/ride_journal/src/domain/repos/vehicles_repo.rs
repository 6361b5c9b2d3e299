use async_trait::async_trait;
use ride_journal_sdk::{PageRequest, Vehicle, VehicleFilter, VehicleType};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct VehicleRecord {
    pub user_id: i32,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: VehicleType,
    pub image: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: Option<VehicleType>,
    pub image: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Repository trait for Vehicle persistence operations.
///
/// Writes that take an `owner_id` are conditional: the owner filter is part
/// of the statement, so a concurrent ownership change can never let a
/// foreign caller through.
#[async_trait]
pub trait VehiclesRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Vehicle>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: VehicleFilter,
        page: &PageRequest,
    ) -> Result<Vec<Vehicle>, DomainError>;

    /// Every vehicle of one user, newest first. Used for includes and cascades.
    async fn list_by_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> Result<Vec<Vehicle>, DomainError>;

    async fn exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: VehicleRecord,
    ) -> Result<Vehicle, DomainError>;

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: VehicleChanges,
    ) -> Result<u64, DomainError>;

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError>;

    async fn delete_by_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> Result<u64, DomainError>;
}
