//! Ride Journal Module
//!
//! Backend for a ride journal: users record vehicles, post events (repairs,
//! modifications, stories, maintenance) against them and attach comments,
//! images and likes to events. Every mutation is authorized by comparing the
//! caller with the recorded owner of the target row.
//!
//! ## Public API
//!
//! The public API is defined in the `ride_journal-sdk` crate. The most used
//! items are re-exported here:
//! - `RideJournalClientV1` - trait for inter-module communication
//! - `SecurityContext` - the caller handed to mutations
//! - `RideJournalError` - error types
//!
//! Other modules obtain a client with [`RideJournal::client`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use ride_journal_sdk::{
    RideJournalClientV1, RideJournalError, SecurityContext, DEFAULT_IMAGE_REF,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::{ConcreteAppServices, RideJournal};

// === LOCAL CLIENT ===
// Local client adapter that implements RideJournalClientV1
pub mod local_client;

pub mod config;
pub mod logging;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
// Only use the SDK types for stable public APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
