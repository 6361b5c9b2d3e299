use std::sync::Arc;

use ride_journal_sdk::{
    Comment, CommentFilter, CommentPatch, NewComment, PageRequest, SecurityContext,
};
use tracing::instrument;

use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard::{self, Owned};
use crate::domain::repos::{
    CommentChanges, CommentRecord, CommentsRepository, EventsRepository, RepoSet,
};

const ENTITY: &str = Comment::ENTITY;

pub struct CommentsService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> CommentsService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        self.deps.repos.comments.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Vec<Comment>, DomainError> {
        let comments = self
            .deps
            .repos
            .comments
            .list(&self.deps.db, filter, &page)
            .await?;
        tracing::debug!("Listed {} comments", comments.len());
        Ok(comments)
    }

    #[instrument(skip(self, ctx, new_comment), fields(caller = ctx.subject_id()))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<Comment, DomainError> {
        tracing::info!("Creating comment");

        guard::ensure_claimed_owner(ENTITY, new_comment.user_id, ctx)?;

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        if !repos.events.exists(&txn, new_comment.event_id).await? {
            return Err(DomainError::referential_integrity(format!(
                "event {} does not exist",
                new_comment.event_id
            )));
        }

        let record = CommentRecord {
            event_id: new_comment.event_id,
            user_id: new_comment.user_id,
            content: new_comment.content,
            created_at: now(),
        };
        let comment = repos.comments.insert(&txn, record).await?;
        commit(txn).await?;

        tracing::info!("Successfully created comment with id={}", comment.id);
        Ok(comment)
    }

    #[instrument(skip(self, ctx, patch), fields(caller = ctx.subject_id()))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: CommentPatch,
    ) -> Result<Comment, DomainError> {
        tracing::info!("Updating comment");

        let changes = CommentChanges {
            content: patch.content,
            updated_at: now(),
        };

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let rows = repos
            .comments
            .update_owned(&txn, id, ctx.subject_id(), changes)
            .await?;
        if rows == 0 {
            let current = repos.comments.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }

        let updated = repos
            .comments
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        commit(txn).await?;
        Ok(updated)
    }

    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting comment");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let rows = repos
            .comments
            .delete_owned(&txn, id, ctx.subject_id())
            .await?;
        if rows == 0 {
            let current = repos.comments.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        commit(txn).await?;
        Ok(rows)
    }
}
