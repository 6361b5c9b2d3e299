//! Domain service layer - ownership-authorized resource services.
//!
//! ## Architecture
//!
//! One service per resource:
//! - `users` - sign-up, profiles, self-only update/delete, credential check
//! - `vehicles` - vehicles and their image reference
//! - `events` - journal events, independently owned from their vehicle
//! - `comments`, `images`, `likes` - content attached to events
//!
//! ## Write discipline
//!
//! Every update/delete is a single conditional write filtered on both the
//! primary key and the recorded owner, executed inside a transaction. A
//! write that touches zero rows re-reads the row to tell `NotFound` from
//! `AuthorizationDenied`. Cascading deletes share the parent's transaction;
//! blob cleanup happens after commit and never fails the operation.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::ports::BlobStore;
use crate::domain::repos::{RepoSet, Repos};
use crate::infra::storage::db::db_err;

mod cascade;
mod comments;
mod events;
mod images;
mod likes;
mod users;
mod vehicles;

pub use comments::CommentsService;
pub use events::EventsService;
pub use images::ImagesService;
pub use likes::LikesService;
pub use users::UsersService;
pub use vehicles::VehiclesService;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub default_vehicle_image: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let limits = LimitCfg::default();
        Self {
            default_page_size: limits.default,
            max_page_size: limits.max,
            default_vehicle_image: ride_journal_sdk::DEFAULT_IMAGE_REF.to_owned(),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn limit_cfg(&self) -> LimitCfg {
        LimitCfg {
            default: self.default_page_size,
            max: self.max_page_size,
        }
    }
}

/// Shared collaborators handed to every service.
pub(crate) struct ServiceDeps<R: RepoSet> {
    pub(crate) db: DatabaseConnection,
    pub(crate) repos: Arc<Repos<R>>,
    pub(crate) blobs: Arc<dyn BlobStore>,
    pub(crate) config: ServiceConfig,
}

impl<R: RepoSet> ServiceDeps<R> {
    async fn begin(&self) -> Result<DatabaseTransaction, DomainError> {
        self.db.begin().await.map_err(db_err)
    }
}

async fn commit(txn: DatabaseTransaction) -> Result<(), DomainError> {
    txn.commit().await.map_err(db_err)
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// DI Container - aggregates all domain services
pub struct AppServices<R: RepoSet> {
    pub users: UsersService<R>,
    pub vehicles: VehiclesService<R>,
    pub events: EventsService<R>,
    pub comments: CommentsService<R>,
    pub images: ImagesService<R>,
    pub likes: LikesService<R>,
}

impl<R: RepoSet> AppServices<R> {
    pub fn new(
        db: DatabaseConnection,
        repos: Repos<R>,
        blobs: Arc<dyn BlobStore>,
        config: ServiceConfig,
    ) -> Self {
        let deps = Arc::new(ServiceDeps {
            db,
            repos: Arc::new(repos),
            blobs,
            config,
        });

        Self {
            users: UsersService::new(Arc::clone(&deps)),
            vehicles: VehiclesService::new(Arc::clone(&deps)),
            events: EventsService::new(Arc::clone(&deps)),
            comments: CommentsService::new(Arc::clone(&deps)),
            images: ImagesService::new(Arc::clone(&deps)),
            likes: LikesService::new(deps),
        }
    }
}
