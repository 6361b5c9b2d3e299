//! Domain layer: ownership rules, pagination and the per-resource services.
//!
//! The domain MAY import the SDK contract types and `infra` helpers.
//! It MUST NOT import `api::*`.

pub mod error;
pub mod guard;
pub mod pagination;
pub mod ports;
pub mod repos;
pub mod service;
