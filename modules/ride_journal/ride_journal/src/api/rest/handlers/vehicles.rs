use ride_journal_sdk::{NewVehicle, VehicleFilter, VehiclePatch};
use tracing::info;

use super::{deleted, list, ok};
use crate::api::rest::dto::{
    parse_vehicle_type, CreateVehicleReq, ListQuery, UpdateVehicleReq, VehicleDto,
    VehicleWithRelationsDto,
};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

async fn list_filtered(
    state: &ApiState,
    filter: VehicleFilter,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<VehicleDto>>> {
    list(state.client().list_vehicles(filter, query.page()).await?)
}

#[tracing::instrument(skip(state))]
pub async fn list_vehicles(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<VehicleDto>>> {
    list_filtered(state, VehicleFilter::All, query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_vehicles_by_user(
    state: &ApiState,
    user_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<VehicleDto>>> {
    list_filtered(state, VehicleFilter::ByUser(user_id), query).await
}

/// `vehicle_type` is the raw path segment, e.g. `suv`.
#[tracing::instrument(skip(state))]
pub async fn list_vehicles_by_type(
    state: &ApiState,
    vehicle_type: &str,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<VehicleDto>>> {
    let vehicle_type = parse_vehicle_type(vehicle_type)?;
    list_filtered(state, VehicleFilter::ByType(vehicle_type), query).await
}

#[tracing::instrument(skip(state))]
pub async fn get_vehicle(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<VehicleDto>> {
    ok(state.client().get_vehicle(id).await?.into())
}

#[tracing::instrument(skip(state))]
pub async fn get_vehicle_with_relations(
    state: &ApiState,
    id: i32,
) -> ApiResult<ApiEnvelope<VehicleWithRelationsDto>> {
    ok(state.client().get_vehicle_with_relations(id).await?.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn create_vehicle(
    state: &ApiState,
    bearer: Option<&str>,
    req: CreateVehicleReq,
) -> ApiResult<ApiEnvelope<VehicleDto>> {
    let ctx = state.authenticate(bearer)?;
    let new_vehicle = NewVehicle::try_from(req)?;
    let vehicle = state.client().create_vehicle(&ctx, new_vehicle).await?;
    info!(vehicle_id = vehicle.id, "Created vehicle");
    ok(vehicle.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn update_vehicle(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
    req: UpdateVehicleReq,
) -> ApiResult<ApiEnvelope<VehicleDto>> {
    let ctx = state.authenticate(bearer)?;
    let patch = VehiclePatch::try_from(req)?;
    ok(state.client().update_vehicle(&ctx, id, patch).await?.into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_vehicle(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    info!(vehicle_id = id, deleter_id = ctx.subject_id(), "Deleting vehicle");
    deleted(state.client().delete_vehicle(&ctx, id).await?)
}
