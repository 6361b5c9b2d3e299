use ride_journal_sdk::LikeFilter;

use super::{deleted, list, ok};
use crate::api::rest::dto::{CreateLikeReq, LikeDto, ListQuery};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

async fn list_filtered(
    state: &ApiState,
    filter: LikeFilter,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<LikeDto>>> {
    list(state.client().list_likes(filter, query.page()).await?)
}

#[tracing::instrument(skip(state))]
pub async fn list_likes(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<LikeDto>>> {
    list_filtered(state, LikeFilter::All, query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_likes_by_event(
    state: &ApiState,
    event_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<LikeDto>>> {
    list_filtered(state, LikeFilter::ByEvent(event_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_likes_by_user(
    state: &ApiState,
    user_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<LikeDto>>> {
    list_filtered(state, LikeFilter::ByUser(user_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn get_like(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<LikeDto>> {
    ok(state.client().get_like(id).await?.into())
}

/// Liking twice returns the existing like.
#[tracing::instrument(skip(state, bearer))]
pub async fn create_like(
    state: &ApiState,
    bearer: Option<&str>,
    req: CreateLikeReq,
) -> ApiResult<ApiEnvelope<LikeDto>> {
    let ctx = state.authenticate(bearer)?;
    ok(state.client().create_like(&ctx, req.into()).await?.into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_like(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    deleted(state.client().delete_like(&ctx, id).await?)
}
