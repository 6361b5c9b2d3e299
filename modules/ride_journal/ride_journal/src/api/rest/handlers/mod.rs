//! Handler functions, one submodule per resource.
//!
//! Reads are anonymous. Mutations authenticate the bearer credential first
//! and fail with 401 before touching the module when it is absent or invalid.

pub mod comments;
pub mod events;
pub mod images;
pub mod likes;
pub mod users;
pub mod vehicles;

use super::envelope::{ApiEnvelope, Deleted};
use super::error::ApiResult;

fn ok<T>(data: T) -> ApiResult<ApiEnvelope<T>> {
    Ok(ApiEnvelope::ok(data))
}

fn deleted(count: u64) -> ApiResult<ApiEnvelope<Deleted>> {
    ok(Deleted { deleted: count })
}

fn list<S, D: From<S>>(items: Vec<S>) -> ApiResult<ApiEnvelope<Vec<D>>> {
    ok(items.into_iter().map(D::from).collect())
}
