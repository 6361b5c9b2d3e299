use async_trait::async_trait;
use ride_journal_sdk::{PageRequest, User, UserProfile};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

/// A fully-formed user row ready to insert.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Column changes for a user. `None` leaves the column untouched.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Repository trait for User persistence operations.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<User>, DomainError>;

    /// Public projection only; never loads the credential hash.
    async fn get_profile<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserProfile>, DomainError>;

    /// The user and its stored password hash, looked up by username.
    async fn find_credentials<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<(User, String)>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: &PageRequest,
    ) -> Result<Vec<UserProfile>, DomainError>;

    async fn exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError>;

    async fn username_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<bool, DomainError>;

    async fn email_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<bool, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<User, DomainError>;

    /// Apply `changes` to the account `id` if and only if it is the caller's own.
    /// Returns the number of rows written.
    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        caller_id: i32,
        changes: UserChanges,
    ) -> Result<u64, DomainError>;

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        caller_id: i32,
    ) -> Result<u64, DomainError>;
}
