use ride_journal_sdk::{ImageFilter, NewImage};

use super::{deleted, list, ok};
use crate::api::rest::dto::{CreateImageReq, ImageDto, ListQuery};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

#[tracing::instrument(skip(state))]
pub async fn list_images(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<ImageDto>>> {
    list(
        state
            .client()
            .list_images(ImageFilter::All, query.page())
            .await?,
    )
}

#[tracing::instrument(skip(state))]
pub async fn list_images_by_event(
    state: &ApiState,
    event_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<ImageDto>>> {
    list(
        state
            .client()
            .list_images(ImageFilter::ByEvent(event_id), query.page())
            .await?,
    )
}

#[tracing::instrument(skip(state))]
pub async fn get_image(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<ImageDto>> {
    ok(state.client().get_image(id).await?.into())
}

/// Attach an image to an event the caller authored.
#[tracing::instrument(skip(state, bearer, req))]
pub async fn create_image(
    state: &ApiState,
    bearer: Option<&str>,
    req: CreateImageReq,
) -> ApiResult<ApiEnvelope<ImageDto>> {
    let ctx = state.authenticate(bearer)?;
    let new_image = NewImage::try_from(req)?;
    ok(state.client().create_image(&ctx, new_image).await?.into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_image(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    deleted(state.client().delete_image(&ctx, id).await?)
}
