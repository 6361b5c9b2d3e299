use std::sync::Arc;

use ride_journal_sdk::{Like, LikeFilter, NewLike, PageRequest, SecurityContext};
use tracing::instrument;

use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard::{self, Owned};
use crate::domain::repos::{EventsRepository, LikeRecord, LikesRepository, RepoSet};

const ENTITY: &str = Like::ENTITY;

/// Likes on events. One like per `(user, event)`; liking twice is a no-op.
pub struct LikesService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> LikesService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Like>, DomainError> {
        self.deps.repos.likes.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: LikeFilter,
        page: PageRequest,
    ) -> Result<Vec<Like>, DomainError> {
        let likes = self
            .deps
            .repos
            .likes
            .list(&self.deps.db, filter, &page)
            .await?;
        tracing::debug!("Listed {} likes", likes.len());
        Ok(likes)
    }

    /// Like an event, or return the caller's existing like on it.
    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_like: NewLike,
    ) -> Result<Like, DomainError> {
        guard::ensure_claimed_owner(ENTITY, new_like.user_id, ctx)?;

        let NewLike { user_id, event_id } = new_like;
        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        if !repos.events.exists(&txn, event_id).await? {
            return Err(DomainError::referential_integrity(format!(
                "event {event_id} does not exist"
            )));
        }

        if let Some(existing) = repos.likes.find_pair(&txn, user_id, event_id).await? {
            tracing::debug!(like_id = existing.id, "event already liked");
            return Ok(existing);
        }

        let record = LikeRecord {
            user_id,
            event_id,
            created_at: now(),
        };
        match repos.likes.insert(&txn, record).await {
            Ok(like) => {
                commit(txn).await?;
                tracing::info!("Successfully created like with id={}", like.id);
                Ok(like)
            }
            // Lost a race against an identical like: hand back the winner.
            Err(DomainError::Conflict { .. }) => {
                drop(txn);
                repos
                    .likes
                    .find_pair(&self.deps.db, user_id, event_id)
                    .await?
                    .ok_or_else(|| DomainError::database("like vanished after conflict"))
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting like");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let rows = repos.likes.delete_owned(&txn, id, ctx.subject_id()).await?;
        if rows == 0 {
            let current = repos.likes.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        commit(txn).await?;
        Ok(rows)
    }
}
