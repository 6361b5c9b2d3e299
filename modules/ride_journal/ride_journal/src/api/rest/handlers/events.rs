use ride_journal_sdk::{EventFilter, EventPatch, NewEvent};
use tracing::info;

use super::{deleted, list, ok};
use crate::api::rest::dto::{
    parse_event_type, CreateEventReq, EventDto, EventWithRelationsDto, ListQuery, UpdateEventReq,
};
use crate::api::rest::{ApiEnvelope, ApiResult, ApiState, Deleted};

async fn list_filtered(
    state: &ApiState,
    filter: EventFilter,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<EventDto>>> {
    list(state.client().list_events(filter, query.page()).await?)
}

#[tracing::instrument(skip(state))]
pub async fn list_events(
    state: &ApiState,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<EventDto>>> {
    list_filtered(state, EventFilter::All, query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_events_by_vehicle(
    state: &ApiState,
    vehicle_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<EventDto>>> {
    list_filtered(state, EventFilter::ByVehicle(vehicle_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_events_by_user(
    state: &ApiState,
    user_id: i32,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<EventDto>>> {
    list_filtered(state, EventFilter::ByUser(user_id), query).await
}

#[tracing::instrument(skip(state))]
pub async fn list_events_by_type(
    state: &ApiState,
    event_type: &str,
    query: &ListQuery,
) -> ApiResult<ApiEnvelope<Vec<EventDto>>> {
    let event_type = parse_event_type(event_type)?;
    list_filtered(state, EventFilter::ByType(event_type), query).await
}

#[tracing::instrument(skip(state))]
pub async fn get_event(state: &ApiState, id: i32) -> ApiResult<ApiEnvelope<EventDto>> {
    ok(state.client().get_event(id).await?.into())
}

#[tracing::instrument(skip(state))]
pub async fn get_event_with_relations(
    state: &ApiState,
    id: i32,
) -> ApiResult<ApiEnvelope<EventWithRelationsDto>> {
    ok(state.client().get_event_with_relations(id).await?.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn create_event(
    state: &ApiState,
    bearer: Option<&str>,
    req: CreateEventReq,
) -> ApiResult<ApiEnvelope<EventDto>> {
    let ctx = state.authenticate(bearer)?;
    let new_event = NewEvent::try_from(req)?;
    let event = state.client().create_event(&ctx, new_event).await?;
    info!(event_id = event.id, "Created event");
    ok(event.into())
}

#[tracing::instrument(skip(state, bearer, req))]
pub async fn update_event(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
    req: UpdateEventReq,
) -> ApiResult<ApiEnvelope<EventDto>> {
    let ctx = state.authenticate(bearer)?;
    let patch = EventPatch::try_from(req)?;
    ok(state.client().update_event(&ctx, id, patch).await?.into())
}

#[tracing::instrument(skip(state, bearer))]
pub async fn delete_event(
    state: &ApiState,
    bearer: Option<&str>,
    id: i32,
) -> ApiResult<ApiEnvelope<Deleted>> {
    let ctx = state.authenticate(bearer)?;
    info!(event_id = id, deleter_id = ctx.subject_id(), "Deleting event");
    deleted(state.client().delete_event(&ctx, id).await?)
}
