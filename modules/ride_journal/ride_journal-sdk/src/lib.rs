//! Ride Journal SDK
//!
//! This crate provides the public API for the `ride_journal` module:
//! - `RideJournalClientV1` trait
//! - Model types for users, vehicles, events, comments, images and likes
//! - List filters and the raw `PageRequest`
//! - The caller identity (`SecurityContext`)
//! - Error type (`RideJournalError`)
//!
//! ## Usage
//!
//! ```ignore
//! use ride_journal_sdk::{RideJournalClientV1, SecurityContext, EventFilter, PageRequest};
//!
//! let ctx = SecurityContext::for_subject(caller_id);
//! let events = client
//!     .list_events(EventFilter::ByVehicle(vehicle_id), PageRequest::default())
//!     .await?;
//! client.delete_event(&ctx, events[0].id).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;
pub mod query;
pub mod security;

pub use client::RideJournalClientV1;
pub use errors::RideJournalError;
pub use models::{
    Comment, CommentPatch, Event, EventPatch, EventType, EventWithRelations, Image, ImageUpload,
    Like, NewComment, NewEvent, NewImage, NewLike, NewUser, NewVehicle, ParseEnumError, User,
    UserPatch, UserProfile, UserWithVehicles, Vehicle, VehiclePatch, VehicleType,
    VehicleWithRelations, DEFAULT_IMAGE_REF,
};
pub use query::{
    CommentFilter, EventFilter, ImageFilter, LikeFilter, PageRequest, VehicleFilter,
    DEFAULT_PAGE_LIMIT,
};
pub use security::SecurityContext;
