//! Infrastructure storage layer - `SeaORM` persistence.
//!
//! This module contains ALL SeaORM-specific code and database operations:
//! - `entity/` - entity definitions (users, vehicles, events, comments, images, likes)
//! - `mapper.rs` - conversions between rows and SDK contract types
//! - `migrations/` - database schema migrations
//! - `*_sea_repo.rs` - repository port implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod comments_sea_repo;
mod events_sea_repo;
mod images_sea_repo;
mod likes_sea_repo;
mod users_sea_repo;
mod vehicles_sea_repo;

pub use comments_sea_repo::OrmCommentsRepository;
pub use events_sea_repo::OrmEventsRepository;
pub use images_sea_repo::OrmImagesRepository;
pub use likes_sea_repo::OrmLikesRepository;
pub use users_sea_repo::OrmUsersRepository;
pub use vehicles_sea_repo::OrmVehiclesRepository;

use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{RepoSet, Repos};

/// The `SeaORM` family of repositories.
pub struct SeaOrmRepos;

impl RepoSet for SeaOrmRepos {
    type Users = OrmUsersRepository;
    type Vehicles = OrmVehiclesRepository;
    type Events = OrmEventsRepository;
    type Comments = OrmCommentsRepository;
    type Images = OrmImagesRepository;
    type Likes = OrmLikesRepository;
}

impl Repos<SeaOrmRepos> {
    #[must_use]
    pub fn sea_orm(limit_cfg: LimitCfg) -> Self {
        Self {
            users: OrmUsersRepository::new(limit_cfg),
            vehicles: OrmVehiclesRepository::new(limit_cfg),
            events: OrmEventsRepository::new(limit_cfg),
            comments: OrmCommentsRepository::new(limit_cfg),
            images: OrmImagesRepository::new(limit_cfg),
            likes: OrmLikesRepository::new(limit_cfg),
        }
    }
}
