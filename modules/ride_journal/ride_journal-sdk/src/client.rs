//! `RideJournalClientV1` trait definition.
//!
//! Reads take no caller identity: they perform no ownership check.
//! Every mutation takes the caller's `SecurityContext`.

use async_trait::async_trait;

use crate::errors::RideJournalError;
use crate::models::{
    Comment, CommentPatch, Event, EventPatch, EventWithRelations, Image, Like, NewComment,
    NewEvent, NewImage, NewLike, NewUser, NewVehicle, User, UserPatch, UserProfile,
    UserWithVehicles, Vehicle, VehiclePatch, VehicleWithRelations,
};
use crate::query::{
    CommentFilter, EventFilter, ImageFilter, LikeFilter, PageRequest, VehicleFilter,
};
use crate::security::SecurityContext;

/// Public API trait for the `ride_journal` module.
///
/// ```ignore
/// let client: Arc<dyn RideJournalClientV1> = module.client();
/// let vehicle = client.get_vehicle(vehicle_id).await?;
/// ```
#[async_trait]
pub trait RideJournalClientV1: Send + Sync {
    // ==================== Users ====================

    async fn register_user(&self, new_user: NewUser) -> Result<User, RideJournalError>;

    async fn get_user(&self, id: i32) -> Result<User, RideJournalError>;

    async fn get_user_profile(&self, id: i32) -> Result<UserProfile, RideJournalError>;

    async fn get_user_with_vehicles(&self, id: i32)
        -> Result<UserWithVehicles, RideJournalError>;

    async fn list_users(&self, page: PageRequest) -> Result<Vec<UserProfile>, RideJournalError>;

    async fn update_user(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: UserPatch,
    ) -> Result<User, RideJournalError>;

    async fn delete_user(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError>;

    // ==================== Vehicles ====================

    async fn list_vehicles(
        &self,
        filter: VehicleFilter,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, RideJournalError>;

    async fn get_vehicle(&self, id: i32) -> Result<Vehicle, RideJournalError>;

    async fn get_vehicle_with_relations(
        &self,
        id: i32,
    ) -> Result<VehicleWithRelations, RideJournalError>;

    async fn create_vehicle(
        &self,
        ctx: &SecurityContext,
        new_vehicle: NewVehicle,
    ) -> Result<Vehicle, RideJournalError>;

    async fn update_vehicle(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: VehiclePatch,
    ) -> Result<Vehicle, RideJournalError>;

    async fn delete_vehicle(&self, ctx: &SecurityContext, id: i32)
        -> Result<u64, RideJournalError>;

    // ==================== Events ====================

    async fn list_events(
        &self,
        filter: EventFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, RideJournalError>;

    async fn get_event(&self, id: i32) -> Result<Event, RideJournalError>;

    async fn get_event_with_relations(
        &self,
        id: i32,
    ) -> Result<EventWithRelations, RideJournalError>;

    async fn create_event(
        &self,
        ctx: &SecurityContext,
        new_event: NewEvent,
    ) -> Result<Event, RideJournalError>;

    async fn update_event(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: EventPatch,
    ) -> Result<Event, RideJournalError>;

    async fn delete_event(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError>;

    // ==================== Comments ====================

    async fn list_comments(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Vec<Comment>, RideJournalError>;

    async fn get_comment(&self, id: i32) -> Result<Comment, RideJournalError>;

    async fn create_comment(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<Comment, RideJournalError>;

    async fn update_comment(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: CommentPatch,
    ) -> Result<Comment, RideJournalError>;

    async fn delete_comment(&self, ctx: &SecurityContext, id: i32)
        -> Result<u64, RideJournalError>;

    // ==================== Images ====================

    async fn list_images(
        &self,
        filter: ImageFilter,
        page: PageRequest,
    ) -> Result<Vec<Image>, RideJournalError>;

    async fn get_image(&self, id: i32) -> Result<Image, RideJournalError>;

    async fn create_image(
        &self,
        ctx: &SecurityContext,
        new_image: NewImage,
    ) -> Result<Image, RideJournalError>;

    async fn delete_image(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError>;

    // ==================== Likes ====================

    async fn list_likes(
        &self,
        filter: LikeFilter,
        page: PageRequest,
    ) -> Result<Vec<Like>, RideJournalError>;

    async fn get_like(&self, id: i32) -> Result<Like, RideJournalError>;

    async fn create_like(
        &self,
        ctx: &SecurityContext,
        new_like: NewLike,
    ) -> Result<Like, RideJournalError>;

    async fn delete_like(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError>;
}
