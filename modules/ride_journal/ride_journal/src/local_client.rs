//! Local implementation of `RideJournalClientV1`.
//!
//! This client is used for in-process consumers. It delegates to the domain
//! services and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use ride_journal_sdk::{
    Comment, CommentFilter, CommentPatch, Event, EventFilter, EventPatch, EventWithRelations,
    Image, ImageFilter, Like, LikeFilter, NewComment, NewEvent, NewImage, NewLike, NewUser,
    NewVehicle, PageRequest, RideJournalClientV1, RideJournalError, SecurityContext, User,
    UserPatch, UserProfile, UserWithVehicles, Vehicle, VehicleFilter, VehiclePatch,
    VehicleWithRelations,
};

use crate::domain::error::DomainError;
use crate::domain::repos::RepoSet;
use crate::domain::service::AppServices;

/// Local implementation of the `RideJournalClientV1` trait that delegates to the domain services.
pub struct RideJournalLocalClient<R: RepoSet> {
    services: Arc<AppServices<R>>,
}

impl<R: RepoSet> RideJournalLocalClient<R> {
    #[must_use]
    pub fn new(services: Arc<AppServices<R>>) -> Self {
        Self { services }
    }
}

fn to_sdk(e: DomainError) -> RideJournalError {
    if e.is_internal() {
        tracing::error!(error = %e, "internal failure crossing the module boundary");
    }
    e.into()
}

fn found<T>(
    entity: &'static str,
    id: i32,
    r: Result<Option<T>, DomainError>,
) -> Result<T, RideJournalError> {
    r.map_err(to_sdk)?
        .ok_or_else(|| RideJournalError::not_found(entity, id))
}

#[async_trait]
impl<R: RepoSet> RideJournalClientV1 for RideJournalLocalClient<R> {
    // ==================== Users ====================

    async fn register_user(&self, new_user: NewUser) -> Result<User, RideJournalError> {
        self.services.users.register(new_user).await.map_err(to_sdk)
    }

    async fn get_user(&self, id: i32) -> Result<User, RideJournalError> {
        found("user", id, self.services.users.get(id).await)
    }

    async fn get_user_profile(&self, id: i32) -> Result<UserProfile, RideJournalError> {
        found("user", id, self.services.users.get_profile(id).await)
    }

    async fn get_user_with_vehicles(
        &self,
        id: i32,
    ) -> Result<UserWithVehicles, RideJournalError> {
        found("user", id, self.services.users.get_with_vehicles(id).await)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Vec<UserProfile>, RideJournalError> {
        self.services.users.list(page).await.map_err(to_sdk)
    }

    async fn update_user(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: UserPatch,
    ) -> Result<User, RideJournalError> {
        self.services
            .users
            .update(ctx, id, patch)
            .await
            .map_err(to_sdk)
    }

    async fn delete_user(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError> {
        self.services.users.delete(ctx, id).await.map_err(to_sdk)
    }

    // ==================== Vehicles ====================

    async fn list_vehicles(
        &self,
        filter: VehicleFilter,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, RideJournalError> {
        self.services
            .vehicles
            .list(filter, page)
            .await
            .map_err(to_sdk)
    }

    async fn get_vehicle(&self, id: i32) -> Result<Vehicle, RideJournalError> {
        found("vehicle", id, self.services.vehicles.get(id).await)
    }

    async fn get_vehicle_with_relations(
        &self,
        id: i32,
    ) -> Result<VehicleWithRelations, RideJournalError> {
        found(
            "vehicle",
            id,
            self.services.vehicles.get_with_relations(id).await,
        )
    }

    async fn create_vehicle(
        &self,
        ctx: &SecurityContext,
        new_vehicle: NewVehicle,
    ) -> Result<Vehicle, RideJournalError> {
        self.services
            .vehicles
            .create(ctx, new_vehicle)
            .await
            .map_err(to_sdk)
    }

    async fn update_vehicle(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: VehiclePatch,
    ) -> Result<Vehicle, RideJournalError> {
        self.services
            .vehicles
            .update(ctx, id, patch)
            .await
            .map_err(to_sdk)
    }

    async fn delete_vehicle(
        &self,
        ctx: &SecurityContext,
        id: i32,
    ) -> Result<u64, RideJournalError> {
        self.services.vehicles.delete(ctx, id).await.map_err(to_sdk)
    }

    // ==================== Events ====================

    async fn list_events(
        &self,
        filter: EventFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, RideJournalError> {
        self.services.events.list(filter, page).await.map_err(to_sdk)
    }

    async fn get_event(&self, id: i32) -> Result<Event, RideJournalError> {
        found("event", id, self.services.events.get(id).await)
    }

    async fn get_event_with_relations(
        &self,
        id: i32,
    ) -> Result<EventWithRelations, RideJournalError> {
        found("event", id, self.services.events.get_with_relations(id).await)
    }

    async fn create_event(
        &self,
        ctx: &SecurityContext,
        new_event: NewEvent,
    ) -> Result<Event, RideJournalError> {
        self.services
            .events
            .create(ctx, new_event)
            .await
            .map_err(to_sdk)
    }

    async fn update_event(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: EventPatch,
    ) -> Result<Event, RideJournalError> {
        self.services
            .events
            .update(ctx, id, patch)
            .await
            .map_err(to_sdk)
    }

    async fn delete_event(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError> {
        self.services.events.delete(ctx, id).await.map_err(to_sdk)
    }

    // ==================== Comments ====================

    async fn list_comments(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Vec<Comment>, RideJournalError> {
        self.services
            .comments
            .list(filter, page)
            .await
            .map_err(to_sdk)
    }

    async fn get_comment(&self, id: i32) -> Result<Comment, RideJournalError> {
        found("comment", id, self.services.comments.get(id).await)
    }

    async fn create_comment(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<Comment, RideJournalError> {
        self.services
            .comments
            .create(ctx, new_comment)
            .await
            .map_err(to_sdk)
    }

    async fn update_comment(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: CommentPatch,
    ) -> Result<Comment, RideJournalError> {
        self.services
            .comments
            .update(ctx, id, patch)
            .await
            .map_err(to_sdk)
    }

    async fn delete_comment(
        &self,
        ctx: &SecurityContext,
        id: i32,
    ) -> Result<u64, RideJournalError> {
        self.services.comments.delete(ctx, id).await.map_err(to_sdk)
    }

    // ==================== Images ====================

    async fn list_images(
        &self,
        filter: ImageFilter,
        page: PageRequest,
    ) -> Result<Vec<Image>, RideJournalError> {
        self.services.images.list(filter, page).await.map_err(to_sdk)
    }

    async fn get_image(&self, id: i32) -> Result<Image, RideJournalError> {
        found("image", id, self.services.images.get(id).await)
    }

    async fn create_image(
        &self,
        ctx: &SecurityContext,
        new_image: NewImage,
    ) -> Result<Image, RideJournalError> {
        self.services
            .images
            .create(ctx, new_image)
            .await
            .map_err(to_sdk)
    }

    async fn delete_image(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError> {
        self.services.images.delete(ctx, id).await.map_err(to_sdk)
    }

    // ==================== Likes ====================

    async fn list_likes(
        &self,
        filter: LikeFilter,
        page: PageRequest,
    ) -> Result<Vec<Like>, RideJournalError> {
        self.services.likes.list(filter, page).await.map_err(to_sdk)
    }

    async fn get_like(&self, id: i32) -> Result<Like, RideJournalError> {
        found("like", id, self.services.likes.get(id).await)
    }

    async fn create_like(
        &self,
        ctx: &SecurityContext,
        new_like: NewLike,
    ) -> Result<Like, RideJournalError> {
        self.services
            .likes
            .create(ctx, new_like)
            .await
            .map_err(to_sdk)
    }

    async fn delete_like(&self, ctx: &SecurityContext, id: i32) -> Result<u64, RideJournalError> {
        self.services.likes.delete(ctx, id).await.map_err(to_sdk)
    }
}
