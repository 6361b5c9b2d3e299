//! Repository ports.
//!
//! All methods accept `conn: &C`, a generic database connection
//! (`DatabaseConnection` or `DatabaseTransaction`), so services decide
//! where the transaction boundary sits.

mod comments_repo;
mod events_repo;
mod images_repo;
mod likes_repo;
mod users_repo;
mod vehicles_repo;

pub use comments_repo::{CommentChanges, CommentRecord, CommentsRepository};
pub use events_repo::{EventChanges, EventRecord, EventsRepository};
pub use images_repo::{ImageRecord, ImagesRepository};
pub use likes_repo::{LikeRecord, LikesRepository};
pub use users_repo::{UserChanges, UserRecord, UsersRepository};
pub use vehicles_repo::{VehicleChanges, VehicleRecord, VehiclesRepository};

/// The family of repositories a service set is built over.
pub trait RepoSet: Send + Sync + 'static {
    type Users: UsersRepository + 'static;
    type Vehicles: VehiclesRepository + 'static;
    type Events: EventsRepository + 'static;
    type Comments: CommentsRepository + 'static;
    type Images: ImagesRepository + 'static;
    type Likes: LikesRepository + 'static;
}

/// One instance of every repository in a [`RepoSet`].
pub struct Repos<R: RepoSet> {
    pub users: R::Users,
    pub vehicles: R::Vehicles,
    pub events: R::Events,
    pub comments: R::Comments,
    pub images: R::Images,
    pub likes: R::Likes,
}
