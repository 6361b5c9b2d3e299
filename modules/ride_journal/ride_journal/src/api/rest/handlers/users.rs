use tracing::info;

use super::{deleted, list, ok};
use crate::api::rest::dto::{
    CreateUserReq, ListQuery, UpdateUserReq, UserDto, UserProfileDto, UserWithVehiclesDto,
};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

/// Sign-up. The only mutation that needs no bearer credential.
#[tracing::instrument(skip(state, req))]
pub async fn register_user(
    state: &ApiState,
    req: CreateUserReq,
) -> ApiResult<ApiEnvelope<UserDto>> {
    let user = state.client().register_user(req.into()).await?;
    info!(user_id = user.id, "Registered user");
    ok(UserDto::from(user))
}

#[tracing::instrument(skip(state))]
pub async fn list_users(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<UserProfileDto>>> {
    list(state.client().list_users(query.page()).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_user(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<UserProfileDto>> {
    ok(state.client().get_user_profile(id).await?.into())
}

#[tracing::instrument(skip(state))]
pub async fn get_user_with_vehicles(
    state: &ApiState,
    id: i32,
) -> ApiResult<ApiEnvelope<UserWithVehiclesDto>> {
    ok(state.client().get_user_with_vehicles(id).await?.into())
}

/// Self-view of the caller's own account, email included.
#[tracing::instrument(skip(state, bearer))]
pub async fn get_me(state: &ApiState, bearer: Option<&str>) -> ApiResult<ApiEnvelope<UserDto>> {
    let ctx = state.authenticate(bearer)?;
    ok(state.client().get_user(ctx.subject_id()).await?.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn update_user(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
    req: UpdateUserReq,
) -> ApiResult<ApiEnvelope<UserDto>> {
    let ctx = state.authenticate(bearer)?;
    info!(user_id = id, updater_id = ctx.subject_id(), "Updating user");
    ok(state.client().update_user(&ctx, id, req.into()).await?.into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_user(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    info!(user_id = id, deleter_id = ctx.subject_id(), "Deleting user");
    deleted(state.client().delete_user(&ctx, id).await?)
}
