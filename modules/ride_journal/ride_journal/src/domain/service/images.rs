use std::sync::Arc;

use ride_journal_sdk::{Image, ImageFilter, NewImage, PageRequest, SecurityContext};
use tracing::instrument;

use super::cascade::discard_blobs;
use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard;
use crate::domain::repos::{EventsRepository, ImageRecord, ImagesRepository, RepoSet};

const ENTITY: &str = "image";

/// Images attached to events. Only the event's owner may add or remove them.
pub struct ImagesService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> ImagesService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Image>, DomainError> {
        self.deps.repos.images.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ImageFilter,
        page: PageRequest,
    ) -> Result<Vec<Image>, DomainError> {
        let images = self
            .deps
            .repos
            .images
            .list(&self.deps.db, filter, &page)
            .await?;
        tracing::debug!("Listed {} images", images.len());
        Ok(images)
    }

    #[instrument(
        skip(self, ctx, new_image),
        fields(caller = ctx.subject_id(), event_id = new_image.event_id)
    )]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_image: NewImage,
    ) -> Result<Image, DomainError> {
        tracing::info!("Attaching image");

        let NewImage { event_id, upload } = new_image;
        let event = self
            .deps
            .repos
            .events
            .get(&self.deps.db, event_id)
            .await?
            .ok_or_else(|| {
                DomainError::referential_integrity(format!("event {event_id} does not exist"))
            })?;
        guard::ensure_owner(&event, ctx)?;

        let reference = self.deps.blobs.put(&upload).await?;
        let record = ImageRecord {
            event_id,
            reference: reference.clone(),
            content_type: upload.content_type,
            created_at: now(),
        };

        match self.deps.repos.images.insert(&self.deps.db, record).await {
            Ok(image) => {
                tracing::info!("Successfully attached image with id={}", image.id);
                Ok(image)
            }
            Err(e) => {
                discard_blobs(
                    self.deps.blobs.as_ref(),
                    [reference],
                    &self.deps.config.default_vehicle_image,
                )
                .await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting image");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let image = repos
            .images
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        let rows = repos
            .images
            .delete_owned(&txn, id, ctx.subject_id())
            .await?;
        if rows == 0 {
            tracing::warn!(id, caller = ctx.subject_id(), "image delete denied");
            return Err(DomainError::authorization_denied(ENTITY, id));
        }
        commit(txn).await?;

        discard_blobs(
            self.deps.blobs.as_ref(),
            [image.reference],
            &self.deps.config.default_vehicle_image,
        )
        .await;
        Ok(rows)
    }
}
