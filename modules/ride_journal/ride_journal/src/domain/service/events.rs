use std::sync::Arc;

use ride_journal_sdk::{
    Event, EventFilter, EventPatch, EventWithRelations, NewEvent, PageRequest, SecurityContext,
};
use tracing::instrument;

use super::cascade::{discard_blobs, purge_event_children};
use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard::{self, Owned};
use crate::domain::repos::{
    CommentsRepository, EventChanges, EventRecord, EventsRepository, ImagesRepository,
    LikesRepository, RepoSet, UsersRepository, VehiclesRepository,
};

const ENTITY: &str = Event::ENTITY;

/// Journal events. An event's owner is its author, not the vehicle's owner.
pub struct EventsService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> EventsService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Event>, DomainError> {
        tracing::debug!("Getting event by id");
        self.deps.repos.events.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: EventFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, DomainError> {
        let events = self
            .deps
            .repos
            .events
            .list(&self.deps.db, filter, &page)
            .await?;
        tracing::debug!("Listed {} events", events.len());
        Ok(events)
    }

    /// The event with its vehicle, author profile, comments, images and likes.
    #[instrument(skip(self))]
    pub async fn get_with_relations(
        &self,
        id: i32,
    ) -> Result<Option<EventWithRelations>, DomainError> {
        let conn = &self.deps.db;
        let repos = &self.deps.repos;

        let Some(event) = repos.events.get(conn, id).await? else {
            return Ok(None);
        };
        let vehicle = repos
            .vehicles
            .get(conn, event.vehicle_id)
            .await?
            .ok_or_else(|| {
                DomainError::referential_integrity(format!(
                    "event {id} refers to missing vehicle {}",
                    event.vehicle_id
                ))
            })?;
        let author = repos
            .users
            .get_profile(conn, event.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::referential_integrity(format!(
                    "event {id} refers to missing user {}",
                    event.user_id
                ))
            })?;
        let comments = repos.comments.list_by_event(conn, id).await?;
        let images = repos.images.list_by_event(conn, id).await?;
        let likes = repos.likes.list_by_event(conn, id).await?;
        let like_count = likes.len();

        Ok(Some(EventWithRelations {
            event,
            vehicle,
            author,
            comments,
            images,
            likes,
            like_count,
        }))
    }

    #[instrument(skip(self, ctx, new_event), fields(caller = ctx.subject_id()))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_event: NewEvent,
    ) -> Result<Event, DomainError> {
        tracing::info!("Creating event");

        guard::ensure_claimed_owner(ENTITY, new_event.user_id, ctx)?;

        let NewEvent {
            vehicle_id,
            user_id,
            title,
            detail,
            event_type,
            date,
            odometer,
            published,
        } = new_event;

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        if !repos.vehicles.exists(&txn, vehicle_id).await? {
            return Err(DomainError::referential_integrity(format!(
                "vehicle {vehicle_id} does not exist"
            )));
        }

        let record = EventRecord {
            vehicle_id,
            user_id,
            title,
            detail,
            event_type,
            date,
            odometer,
            published,
            created_at: now(),
        };
        let event = repos.events.insert(&txn, record).await?;
        commit(txn).await?;

        tracing::info!("Successfully created event with id={}", event.id);
        Ok(event)
    }

    #[instrument(skip(self, ctx, patch), fields(caller = ctx.subject_id()))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: EventPatch,
    ) -> Result<Event, DomainError> {
        tracing::info!("Updating event");

        let EventPatch {
            title,
            detail,
            event_type,
            date,
            odometer,
            published,
        } = patch;
        let changes = EventChanges {
            title,
            detail,
            event_type,
            date,
            odometer,
            published,
            updated_at: now(),
        };

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let rows = repos
            .events
            .update_owned(&txn, id, ctx.subject_id(), changes)
            .await?;
        if rows == 0 {
            let current = repos.events.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }

        let updated = repos
            .events
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        commit(txn).await?;

        tracing::info!("Successfully updated event");
        Ok(updated)
    }

    /// Delete an event together with its comments, images and likes.
    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting event");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let current = repos
            .events
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        guard::ensure_owner(&current, ctx)?;

        let orphaned = purge_event_children(repos, &txn, &[id]).await?;
        let rows = repos
            .events
            .delete_owned(&txn, id, ctx.subject_id())
            .await?;
        if rows == 0 {
            let current = repos.events.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        commit(txn).await?;

        discard_blobs(
            self.deps.blobs.as_ref(),
            orphaned,
            &self.deps.config.default_vehicle_image,
        )
        .await;

        tracing::info!("Successfully deleted event");
        Ok(rows)
    }
}
