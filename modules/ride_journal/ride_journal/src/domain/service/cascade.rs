//! Cascading deletes and blob cleanup shared by the services.

use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::ports::BlobStore;
use crate::domain::repos::{
    CommentsRepository, EventsRepository, ImagesRepository, LikesRepository, RepoSet, Repos,
};

/// Remove comments, images and likes attached to `event_ids`.
///
/// Returns the blob references of the removed images; they must only be
/// discarded after the surrounding transaction commits.
pub(super) async fn purge_event_children<R, C>(
    repos: &Repos<R>,
    conn: &C,
    event_ids: &[i32],
) -> Result<Vec<String>, DomainError>
where
    R: RepoSet,
    C: ConnectionTrait + Send + Sync,
{
    if event_ids.is_empty() {
        return Ok(Vec::new());
    }
    let references = repos.images.references_for(conn, event_ids).await?;
    let comments = repos.comments.delete_for(conn, event_ids, None).await?;
    let images = repos.images.delete_for(conn, event_ids).await?;
    let likes = repos.likes.delete_for(conn, event_ids, None).await?;
    tracing::debug!(
        events = event_ids.len(),
        comments,
        images,
        likes,
        "purged event children"
    );
    Ok(references)
}

/// Remove every event in `event_ids` together with its children.
pub(super) async fn purge_events<R, C>(
    repos: &Repos<R>,
    conn: &C,
    event_ids: &[i32],
) -> Result<Vec<String>, DomainError>
where
    R: RepoSet,
    C: ConnectionTrait + Send + Sync,
{
    let references = purge_event_children(repos, conn, event_ids).await?;
    repos.events.delete_by_ids(conn, event_ids).await?;
    Ok(references)
}

/// Best-effort removal of blobs that are no longer referenced.
///
/// Failures are logged and swallowed: the rows are already gone.
pub(super) async fn discard_blobs<I>(blobs: &dyn BlobStore, references: I, default_ref: &str)
where
    I: IntoIterator<Item = String>,
{
    for reference in references {
        if reference == default_ref {
            continue;
        }
        if let Err(e) = blobs.delete(&reference).await {
            tracing::warn!(%reference, error = %e, "failed to discard blob (continuing)");
        }
    }
}
