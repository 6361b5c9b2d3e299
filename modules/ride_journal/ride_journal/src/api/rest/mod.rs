//! Transport-agnostic REST layer.
//!
//! No router is mounted here: each handler takes the [`ApiState`], the raw
//! bearer credential (for mutations) and the request DTO, and returns the
//! enveloped response or an [`ApiError`] already mapped to a status code.
//! A server adapter only has to extract path/query/body and serialize.

use std::sync::Arc;

use ride_journal_sdk::{RideJournalClientV1, SecurityContext};

use crate::domain::ports::IdentityResolver;

pub mod dto;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod openapi;

pub use envelope::{ApiEnvelope, Deleted, ErrorEnvelope};
pub use error::{ApiError, ApiResult};

/// Everything a handler needs: the module client and the identity resolver.
#[derive(Clone)]
pub struct ApiState {
    client: Arc<dyn RideJournalClientV1>,
    identity: Arc<dyn IdentityResolver>,
}

impl ApiState {
    #[must_use]
    pub fn new(client: Arc<dyn RideJournalClientV1>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { client, identity }
    }

    pub(crate) fn client(&self) -> &dyn RideJournalClientV1 {
        self.client.as_ref()
    }

    /// Resolve the caller of a mutating request.
    pub(crate) fn authenticate(&self, bearer: Option<&str>) -> ApiResult<SecurityContext> {
        Ok(self.identity.resolve(bearer)?)
    }
}
