use ride_journal_sdk::CommentFilter;

use super::{deleted, list, ok};
use crate::api::rest::dto::{CommentDto, CreateCommentReq, ListQuery, UpdateCommentReq};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

async fn list_filtered(
    state: &ApiState,
    filter: CommentFilter,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<CommentDto>>> {
    list(state.client().list_comments(filter, query.page()).await?)
}

#[tracing::instrument(skip(state))]
pub async fn list_comments(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<CommentDto>>> {
    list_filtered(state, CommentFilter::All, query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_comments_by_event(
    state: &ApiState,
    event_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<CommentDto>>> {
    list_filtered(state, CommentFilter::ByEvent(event_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_comments_by_user(
    state: &ApiState,
    user_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<CommentDto>>> {
    list_filtered(state, CommentFilter::ByUser(user_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn get_comment(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<CommentDto>> {
    ok(state.client().get_comment(id).await?.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn create_comment(
    state: &ApiState,
    bearer: Option<&str>,
    req: CreateCommentReq,
) -> ApiResult<ApiEnvelope<CommentDto>> {
    let ctx = state.authenticate(bearer)?;
    ok(state.client().create_comment(&ctx, req.into()).await?.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn update_comment(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
    req: UpdateCommentReq,
) -> ApiResult<ApiEnvelope<CommentDto>> {
    let ctx = state.authenticate(bearer)?;
    ok(state
        .client()
        .update_comment(&ctx, id, req.into())
        .await?
        .into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_comment(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    deleted(state.client().delete_comment(&ctx, id).await?)
}
